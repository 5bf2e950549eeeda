use crate::repositories::PageInfo as ResultPage;

/// GraphQL connection page info.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageInfo {
    pub start_cursor: Option<String>,
    pub end_cursor: Option<String>,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

impl PageInfo {
    /// Page info of an empty result.
    pub fn empty() -> Self {
        Self::from(&ResultPage::empty())
    }
}

impl From<&ResultPage> for PageInfo {
    fn from(page: &ResultPage) -> Self {
        Self {
            start_cursor: page.start_cursor.clone(),
            end_cursor: page.end_cursor.clone(),
            has_next_page: page.has_next_page,
            has_previous_page: page.has_previous_page,
        }
    }
}
