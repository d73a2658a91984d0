//! Client-side routing
//!
//! Maps paths to routes and routes to freshly mounted screens. Navigating
//! away unmounts the previous screen so its late results are discarded.

use crate::api::{BookApi, ListQuery};
use crate::types::BookId;
use crate::views::{BookEditor, Catalog, DetailView, ListView, Mount};
use std::fmt;
use std::str::FromStr;

/// A client-side location
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/`
    List,
    /// `/books/new`
    New,
    /// `/books/{id}`
    Detail(BookId),
    /// `/books/{id}/edit`
    Edit(BookId),
    /// Anything else, keeping the original path
    NotFound(String),
}

impl Route {
    /// Resolve a path, ignoring query string, fragment and trailing slashes
    pub fn parse(path: &str) -> Self {
        let clean = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim();
        let segments: Vec<&str> = clean.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Route::List,
            ["books", "new"] => Route::New,
            ["books", id] => match id.parse() {
                Ok(id) => Route::Detail(id),
                Err(_) => Route::NotFound(path.to_string()),
            },
            ["books", id, "edit"] if *id != "new" => match id.parse() {
                Ok(id) => Route::Edit(id),
                Err(_) => Route::NotFound(path.to_string()),
            },
            _ => Route::NotFound(path.to_string()),
        }
    }

    /// The canonical path for this route
    pub fn path(&self) -> String {
        match self {
            Route::List => "/".to_string(),
            Route::New => "/books/new".to_string(),
            Route::Detail(id) => format!("/books/{}", id),
            Route::Edit(id) => format!("/books/{}/edit", id),
            Route::NotFound(path) => path.clone(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

impl FromStr for Route {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Route::parse(s))
    }
}

/// A mounted screen
pub enum Screen {
    List(ListView),
    Detail(DetailView),
    Editor(BookEditor),
    NotFound(String),
}

impl Screen {
    /// Run the screen's on-mount requests
    pub async fn activate(&mut self, api: &dyn BookApi) {
        match self {
            Screen::List(view) => view.load(api).await,
            Screen::Detail(view) => view.load(api).await,
            Screen::Editor(editor) => editor.load(api).await,
            Screen::NotFound(path) => tracing::debug!(%path, "no screen for path"),
        }
    }
}

/// Owns the current location and the hoisted catalog
pub struct Router {
    current: Route,
    mount: Option<Mount>,
    catalog: Catalog,
    list_query: ListQuery,
}

impl Router {
    pub fn new() -> Self {
        Self {
            current: Route::List,
            mount: None,
            catalog: Catalog::new(),
            list_query: ListQuery::default(),
        }
    }

    /// Query used whenever the list screen is mounted
    pub fn with_list_query(mut self, query: ListQuery) -> Self {
        self.list_query = query;
        self
    }

    pub fn current(&self) -> &Route {
        &self.current
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Leave the current screen and mount the one for `route`
    pub fn navigate(&mut self, route: Route) -> Screen {
        if let Some(previous) = self.mount.take() {
            previous.unmount();
        }

        tracing::debug!(from = %self.current, to = %route, "navigating");
        let mount = Mount::new();
        self.mount = Some(mount.clone());
        self.current = route.clone();

        match route {
            Route::List => Screen::List(
                ListView::new(mount)
                    .with_query(self.list_query.clone())
                    .with_catalog(self.catalog.clone()),
            ),
            Route::New => Screen::Editor(BookEditor::create(mount)),
            Route::Detail(id) => {
                Screen::Detail(DetailView::new(id, mount).with_catalog(self.catalog.clone()))
            }
            Route::Edit(id) => Screen::Editor(BookEditor::edit(id, mount)),
            Route::NotFound(path) => Screen::NotFound(path),
        }
    }

    /// Resolve `path` and navigate to it
    pub fn open(&mut self, path: &str) -> Screen {
        self.navigate(Route::parse(path))
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiCall, MemoryBookApi};
    use crate::types::BookDraft;
    use crate::views::EditorMode;

    #[test]
    fn test_parse_routes() {
        assert_eq!(Route::parse("/"), Route::List);
        assert_eq!(Route::parse(""), Route::List);
        assert_eq!(Route::parse("/books/new"), Route::New);
        assert_eq!(Route::parse("/books/1"), Route::Detail(BookId::from("1")));
        assert_eq!(Route::parse("/books/1/"), Route::Detail(BookId::from("1")));
        assert_eq!(Route::parse("/books/7/edit"), Route::Edit(BookId::from("7")));
        assert_eq!(Route::parse("/books/7?tab=cover#top"), Route::Detail(BookId::from("7")));
        assert_eq!(
            Route::parse("/authors/3"),
            Route::NotFound("/authors/3".to_string())
        );
        assert_eq!(
            Route::parse("/books/7/delete"),
            Route::NotFound("/books/7/delete".to_string())
        );
        assert_eq!(
            Route::parse("/books/new/edit"),
            Route::NotFound("/books/new/edit".to_string())
        );
    }

    #[test]
    fn test_paths_round_trip() {
        for path in ["/", "/books/new", "/books/12", "/books/12/edit"] {
            assert_eq!(Route::parse(path).path(), path);
        }
        assert_eq!(Route::Detail(BookId::from("1")).to_string(), "/books/1");
    }

    #[test]
    fn test_navigate_builds_screens() {
        let mut router = Router::new();

        assert!(matches!(router.open("/"), Screen::List(_)));
        assert!(matches!(router.open("/books/3"), Screen::Detail(v) if v.id() == &BookId::from("3")));

        match router.open("/books/3/edit") {
            Screen::Editor(editor) => {
                assert_eq!(editor.mode(), &EditorMode::Edit(BookId::from("3")))
            }
            _ => panic!("expected editor"),
        }
        match router.open("/books/new") {
            Screen::Editor(editor) => assert_eq!(editor.mode(), &EditorMode::Create),
            _ => panic!("expected editor"),
        }

        assert!(matches!(router.open("/nowhere"), Screen::NotFound(p) if p == "/nowhere"));
        assert_eq!(router.current(), &Route::NotFound("/nowhere".to_string()));
    }

    #[tokio::test]
    async fn test_navigation_unmounts_previous_screen() {
        let api = MemoryBookApi::new();
        api.seed(BookDraft::new("A", "B", "C"));
        let mut router = Router::new();

        let mut stale = router.open("/");
        let _detail = router.open("/books/1");

        // The list was left before its request resolved.
        stale.activate(&api).await;
        match stale {
            Screen::List(view) => assert!(view.is_loading()),
            _ => unreachable!(),
        }
        assert!(router.catalog().is_empty());
    }

    #[tokio::test]
    async fn test_list_scenario_through_router() {
        let api = MemoryBookApi::new();
        api.seed(BookDraft::new("A", "Someone", "Text"));
        let mut router = Router::new();

        let mut screen = router.open("/");
        screen.activate(&api).await;

        let Screen::List(view) = screen else {
            panic!("expected list");
        };
        assert_eq!(view.cards().len(), 1);
        assert_eq!(view.cards()[0].title, "A");
        assert_eq!(Route::parse(&view.cards()[0].href), Route::Detail(BookId::from("1")));
        assert_eq!(router.catalog().len(), 1);
        assert_eq!(api.calls(), vec![ApiCall::List(ListQuery::default())]);
    }
}
