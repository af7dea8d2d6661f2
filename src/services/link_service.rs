//! Navigation link building

use url::Url;
use uuid::Uuid;

use crate::config::{ConfigError, LinkConfig, parse_base_url};
use crate::constants::USERS_PATH;
use crate::models::Link;
use crate::schemas::PageQuery;

/// Builds resource and pagination links under a fixed base URL
#[derive(Debug, Clone)]
pub struct LinkService {
    base_url: Url,
}

impl LinkService {
    /// Create a link service; the base must be an absolute http(s) URL
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
        })
    }

    pub fn from_config(config: &LinkConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
        }
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        url.set_query(None);
        url.set_fragment(None);
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn page_href(&self, page: u64, size: u32) -> String {
        let mut url = self.endpoint(&[USERS_PATH]);
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("size", &size.to_string());
        url.into()
    }

    /// Self, update and delete links for a single user
    pub fn user_links(&self, id: Uuid) -> Vec<Link> {
        let href: String = self.endpoint(&[USERS_PATH, id.to_string().as_str()]).into();
        vec![
            Link::new("self", href.clone(), "GET"),
            Link::new("update", href.clone(), "PUT"),
            Link::new("delete", href, "DELETE"),
        ]
    }

    /// Self, first and last links, plus prev/next where they exist
    pub fn pagination_links(&self, query: PageQuery, total: u64) -> Vec<Link> {
        let page = u64::from(query.page());
        let size = query.size();
        let last = query.last_page(total);

        let mut links = vec![
            Link::new("self", self.page_href(page, size), "GET"),
            Link::new("first", self.page_href(1, size), "GET"),
            Link::new("last", self.page_href(last, size), "GET"),
        ];
        if page > 1 {
            links.push(Link::new("prev", self.page_href(page - 1, size), "GET"));
        }
        if page < last {
            links.push(Link::new("next", self.page_href(page + 1, size), "GET"));
        }
        links
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rels(links: &[Link]) -> Vec<&str> {
        links.iter().map(|l| l.rel.as_str()).collect()
    }

    #[test]
    fn test_user_links() {
        let service = LinkService::new("http://localhost:8000").unwrap();
        let id = Uuid::nil();
        let links = service.user_links(id);

        assert_eq!(rels(&links), vec!["self", "update", "delete"]);
        assert_eq!(
            links[0].href,
            "http://localhost:8000/users/00000000-0000-0000-0000-000000000000"
        );
        assert_eq!(links[1].action, "PUT");
        assert_eq!(links[2].media_type, "application/json");
    }

    #[test]
    fn test_user_links_keep_base_path() {
        let service = LinkService::new("https://api.example.com/v1/").unwrap();
        let links = service.user_links(Uuid::nil());
        assert!(links[0].href.starts_with("https://api.example.com/v1/users/"));
    }

    #[test]
    fn test_pagination_links_middle_page() {
        let service = LinkService::new("http://localhost:8000").unwrap();
        let links = service.pagination_links(PageQuery::new(2, 10).unwrap(), 35);

        assert_eq!(rels(&links), vec!["self", "first", "last", "prev", "next"]);
        assert_eq!(links[0].href, "http://localhost:8000/users?page=2&size=10");
        assert_eq!(links[2].href, "http://localhost:8000/users?page=4&size=10");
    }

    #[test]
    fn test_pagination_links_single_page() {
        let service = LinkService::new("http://localhost:8000").unwrap();
        let links = service.pagination_links(PageQuery::new(1, 20).unwrap(), 0);
        assert_eq!(rels(&links), vec!["self", "first", "last"]);
    }

    #[test]
    fn test_rejects_non_http_base() {
        assert!(LinkService::new("ftp://example.com").is_err());
    }
}
