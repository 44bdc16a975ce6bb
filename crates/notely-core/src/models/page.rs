//! Paged responses from the notes service

use serde::{Deserialize, Serialize};

/// Sort metadata attached to a page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortInfo {
    #[serde(default)]
    pub sorted: bool,
    #[serde(default)]
    pub unsorted: bool,
    #[serde(default)]
    pub empty: bool,
}

/// Position of a page within the full result set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pageable {
    #[serde(default)]
    pub page_number: u32,
    #[serde(default)]
    pub page_size: u32,
    #[serde(default)]
    pub sort: SortInfo,
    #[serde(default)]
    pub offset: u64,
    #[serde(default)]
    pub paged: bool,
    #[serde(default)]
    pub unpaged: bool,
}

/// One page of results plus total-count metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub content: Vec<T>,
    #[serde(default)]
    pub pageable: Option<Pageable>,
    pub total_elements: u64,
    pub total_pages: u32,
    #[serde(default)]
    pub last: bool,
    #[serde(default)]
    pub first: bool,
    #[serde(default)]
    pub empty: bool,
    #[serde(default)]
    pub size: u32,
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub number_of_elements: u32,
    #[serde(default)]
    pub sort: Option<SortInfo>,
}

impl<T> PageResponse<T> {
    /// Builds the page a server would return for `content` sliced out of `total_elements`.
    #[allow(clippy::cast_possible_truncation)]
    pub fn new(content: Vec<T>, number: u32, size: u32, total_elements: u64) -> Self {
        let total_pages = if size == 0 {
            0
        } else {
            total_elements.div_ceil(u64::from(size)) as u32
        };
        let number_of_elements = content.len() as u32;
        Self {
            empty: content.is_empty(),
            content,
            pageable: Some(Pageable {
                page_number: number,
                page_size: size,
                offset: u64::from(number) * u64::from(size),
                paged: true,
                ..Pageable::default()
            }),
            total_elements,
            total_pages,
            last: number + 1 >= total_pages,
            first: number == 0,
            size,
            number,
            number_of_elements,
            sort: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_spring_style_page() {
        let payload = r#"{
            "content": [1, 2],
            "pageable": {
                "pageNumber": 1,
                "pageSize": 2,
                "sort": {"sorted": true, "unsorted": false, "empty": false},
                "offset": 2,
                "paged": true,
                "unpaged": false
            },
            "totalElements": 5,
            "totalPages": 3,
            "last": false,
            "size": 2,
            "number": 1,
            "sort": {"sorted": true, "unsorted": false, "empty": false},
            "numberOfElements": 2,
            "first": false,
            "empty": false
        }"#;

        let page: PageResponse<u32> = serde_json::from_str(payload).unwrap();
        assert_eq!(page.content, vec![1, 2]);
        assert_eq!(page.total_elements, 5);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.pageable.unwrap().offset, 2);
        assert!(page.sort.unwrap().sorted);
    }

    #[test]
    fn deserializes_minimal_page() {
        let page: PageResponse<u32> =
            serde_json::from_str(r#"{"content": [], "totalElements": 0, "totalPages": 0}"#)
                .unwrap();
        assert!(page.content.is_empty());
        assert!(page.pageable.is_none());
    }

    #[test]
    fn new_computes_paging_metadata() {
        let page = PageResponse::new(vec!['a', 'b'], 0, 2, 5);
        assert_eq!(page.total_pages, 3);
        assert!(page.first);
        assert!(!page.last);
        assert_eq!(page.number_of_elements, 2);

        let last = PageResponse::new(vec!['e'], 2, 2, 5);
        assert!(last.last);
    }
}
