//! Where a clicked item leads, and the site's internal route table.

/// A classified item destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination<'a> {
    /// Path routed inside the site, e.g. `/about`.
    Internal(&'a str),
    /// Anything else, opened outside the menu.
    External(&'a str),
}

impl<'a> Destination<'a> {
    /// Classify a destination string. A leading `/` means internal.
    pub fn classify(destination: &'a str) -> Self {
        if destination.starts_with('/') {
            Self::Internal(destination)
        } else {
            Self::External(destination)
        }
    }
}

/// Pages the site can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// The carousel menu.
    Menu,
    /// Static about page.
    About,
    /// Blog index with its category buttons.
    Blog,
    /// Professional blog posts.
    BlogProfessional,
    /// Personal blog posts.
    BlogPersonal,
    /// Fallback for unknown paths.
    NotFound,
}

impl Route {
    /// Resolve a location path. Trailing slashes, query strings and
    /// fragments are ignored.
    pub fn from_path(path: &str) -> Self {
        let path = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim_end_matches('/');
        match path {
            "" => Self::Menu,
            "/about" => Self::About,
            "/blog" => Self::Blog,
            "/blog/professional" => Self::BlogProfessional,
            "/blog/personal" => Self::BlogPersonal,
            _ => Self::NotFound,
        }
    }

    /// Canonical path of the route. `NotFound` has none.
    pub fn path(self) -> Option<&'static str> {
        match self {
            Self::Menu => Some("/"),
            Self::About => Some("/about"),
            Self::Blog => Some("/blog"),
            Self::BlogProfessional => Some("/blog/professional"),
            Self::BlogPersonal => Some("/blog/personal"),
            Self::NotFound => None,
        }
    }
}

/// A button on a static page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLink {
    /// Button caption.
    pub label: &'static str,
    /// Internal path the button routes to.
    pub path: &'static str,
}

/// Text and buttons of a static page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageContent {
    /// Page heading.
    pub title: &'static str,
    /// One-paragraph body.
    pub body: &'static str,
    /// Buttons, left to right.
    pub links: &'static [PageLink],
}

const HOME: PageLink = PageLink {
    label: "Back to menu",
    path: "/",
};

const BLOG: PageLink = PageLink {
    label: "Back to blog",
    path: "/blog",
};

impl Route {
    /// Static content for every route except the carousel menu.
    pub fn content(self) -> Option<PageContent> {
        let content = match self {
            Self::Menu => return None,
            Self::About => PageContent {
                title: "About me",
                body: "Software developer who likes building small, playful \
                       things for the web.",
                links: &[HOME],
            },
            Self::Blog => PageContent {
                title: "Blog",
                body: "Please select the blog you would like to explore...",
                links: &[
                    PageLink {
                        label: "Professional",
                        path: "/blog/professional",
                    },
                    PageLink {
                        label: "Personal",
                        path: "/blog/personal",
                    },
                    HOME,
                ],
            },
            Self::BlogProfessional => PageContent {
                title: "Professional",
                body: "Posts about work and projects are on their way.",
                links: &[BLOG],
            },
            Self::BlogPersonal => PageContent {
                title: "Personal",
                body: "Posts about everything else are on their way.",
                links: &[BLOG],
            },
            Self::NotFound => PageContent {
                title: "Page not found",
                body: "There is nothing at this address.",
                links: &[HOME],
            },
        };
        Some(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_slash_is_internal() {
        assert_eq!(Destination::classify("/about"), Destination::Internal("/about"));
        assert_eq!(
            Destination::classify("https://example.com"),
            Destination::External("https://example.com")
        );
        assert_eq!(Destination::classify(""), Destination::External(""));
    }

    #[test]
    fn routes_resolve_with_and_without_trailing_slash() {
        assert_eq!(Route::from_path("/"), Route::Menu);
        assert_eq!(Route::from_path(""), Route::Menu);
        assert_eq!(Route::from_path("/about/"), Route::About);
        assert_eq!(Route::from_path("/blog?page=2"), Route::Blog);
        assert_eq!(Route::from_path("/blog/personal#top"), Route::BlogPersonal);
        assert_eq!(Route::from_path("/nope"), Route::NotFound);
    }

    #[test]
    fn canonical_paths_round_trip() {
        for route in [
            Route::Menu,
            Route::About,
            Route::Blog,
            Route::BlogProfessional,
            Route::BlogPersonal,
        ] {
            let path = route.path().unwrap();
            assert_eq!(Route::from_path(path), route);
        }
        assert_eq!(Route::NotFound.path(), None);
    }

    #[test]
    fn every_page_link_resolves_to_a_known_route() {
        for route in [
            Route::About,
            Route::Blog,
            Route::BlogProfessional,
            Route::BlogPersonal,
            Route::NotFound,
        ] {
            let content = route.content().unwrap();
            assert!(!content.links.is_empty());
            for link in content.links {
                assert_ne!(Route::from_path(link.path), Route::NotFound);
            }
        }
        assert_eq!(Route::Menu.content(), None);
    }
}
