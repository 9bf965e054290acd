use crate::debounce::Debouncer;
use folio_core::QueryParams;
use std::time::Duration;

pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Where a search for `term` should navigate to, starting from the
/// current page's query string.
///
/// Sets `q` (or removes it for an empty term), always goes back to page 1
/// and leaves every other parameter as it was.
pub fn search_params(current: &QueryParams, term: &str) -> QueryParams {
    let mut params = current.clone();
    if term.is_empty() {
        params.delete("q");
    } else {
        params.set("q", term);
    }
    params.set("page", "1");
    params
}

/// A search input that replaces the current location once typing pauses.
pub struct SearchBox {
    initial: Option<String>,
    debouncer: Debouncer<String>,
}

impl SearchBox {
    /// `navigate` receives the full `path?query` to replace the location with.
    pub fn new<N>(pathname: impl Into<String>, params: QueryParams, navigate: N) -> Self
    where
        N: FnMut(String) + Send + 'static,
    {
        Self::with_delay(pathname, params, SEARCH_DEBOUNCE, navigate)
    }

    pub fn with_delay<N>(
        pathname: impl Into<String>,
        params: QueryParams,
        delay: Duration,
        mut navigate: N,
    ) -> Self
    where
        N: FnMut(String) + Send + 'static,
    {
        let pathname = pathname.into();
        let initial = params.get("q").map(str::to_string);
        let mut current = params;
        let debouncer = Debouncer::new(delay, move |term: String| {
            current = search_params(&current, &term);
            let href = format!("{}?{}", pathname, current.encode());
            tracing::debug!("search navigating to {}", href);
            navigate(href);
        });
        Self { initial, debouncer }
    }

    /// The value the input starts with.
    pub fn default_value(&self) -> Option<&str> {
        self.initial.as_deref()
    }

    /// Called on every change of the input.
    pub fn input(&self, term: &str) {
        self.debouncer.push(term.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tokio::time::sleep;

    #[test]
    fn test_search_params_resets_page() {
        let current = QueryParams::parse("category=Growth+Companies&page=5");
        assert_eq!(
            search_params(&current, "tesla").encode(),
            "category=Growth+Companies&page=1&q=tesla"
        );
    }

    #[test]
    fn test_empty_term_clears_query() {
        let current = QueryParams::parse("q=gold&page=3");
        assert_eq!(search_params(&current, "").encode(), "page=1");
    }

    #[tokio::test(start_paused = true)]
    async fn test_typing_navigates_once() {
        let visited = Arc::new(Mutex::new(Vec::new()));
        let sink = visited.clone();
        let search = SearchBox::new(
            "/admin/articles",
            QueryParams::parse("q=old&page=4"),
            move |href| sink.lock().unwrap().push(href),
        );
        assert_eq!(search.default_value(), Some("old"));

        for term in ["n", "ni", "nif", "nifty"] {
            search.input(term);
            sleep(Duration::from_millis(50)).await;
        }
        sleep(SEARCH_DEBOUNCE).await;

        assert_eq!(*visited.lock().unwrap(), vec!["/admin/articles?q=nifty&page=1".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_later_search_builds_on_previous_location() {
        let visited = Arc::new(Mutex::new(Vec::new()));
        let sink = visited.clone();
        let search = SearchBox::new("/admin", QueryParams::new(), move |href| {
            sink.lock().unwrap().push(href)
        });

        search.input("gold");
        sleep(Duration::from_secs(1)).await;
        search.input("");
        sleep(Duration::from_secs(1)).await;

        assert_eq!(
            *visited.lock().unwrap(),
            vec!["/admin?q=gold&page=1".to_string(), "/admin?page=1".to_string()]
        );
    }
}
