// src/routes.rs

use crate::session::Session;

// Abas do /main/*. Algumas estão declaradas mas ainda sem tela.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainTab {
    Overview,
    Clients,
    Suppliers,
    Products,
    Reports,
    Users,
    Sales,
    Inventory,
    Finance,
    Settings,
}

impl MainTab {
    pub const ALL: [MainTab; 10] = [
        MainTab::Overview,
        MainTab::Clients,
        MainTab::Suppliers,
        MainTab::Products,
        MainTab::Reports,
        MainTab::Users,
        MainTab::Sales,
        MainTab::Inventory,
        MainTab::Finance,
        MainTab::Settings,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            MainTab::Overview => "overview",
            MainTab::Clients => "clients",
            MainTab::Suppliers => "suppliers",
            MainTab::Products => "products",
            MainTab::Reports => "reports",
            MainTab::Users => "users",
            MainTab::Sales => "sales",
            MainTab::Inventory => "inventory",
            MainTab::Finance => "finance",
            MainTab::Settings => "settings",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tab| tab.slug() == slug)
    }

    // Abas que já têm página de verdade
    pub fn is_implemented(&self) -> bool {
        matches!(
            self,
            MainTab::Overview | MainTab::Clients | MainTab::Suppliers | MainTab::Users
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Main(MainTab),
}

impl Route {
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Some(Route::Home),
            ["login"] => Some(Route::Login),
            ["main"] => Some(Route::Main(MainTab::Overview)),
            ["main", tab] => MainTab::from_slug(tab).map(Route::Main),
            _ => None,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::Main(tab) => format!("/main/{}", tab.slug()),
        }
    }

    pub fn is_protected(&self) -> bool {
        matches!(self, Route::Main(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Render(Route),
    Redirect(Route),
    NotFound,
}

/// Guarda de rota: protegidas só com sessão autenticada, senão vai para /login.
pub fn guard(route: Route, session: &Session) -> Resolution {
    if route.is_protected() && !session.is_authenticated() {
        tracing::debug!("Acesso negado a {}, redirecionando para /login", route.path());
        return Resolution::Redirect(Route::Login);
    }
    Resolution::Render(route)
}

pub fn resolve(path: &str, session: &Session) -> Resolution {
    match Route::parse(path) {
        Some(route) => guard(route, session),
        None => Resolution::NotFound,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_path_agree() {
        assert_eq!(Route::parse("/"), Some(Route::Home));
        assert_eq!(Route::parse("/login"), Some(Route::Login));
        assert_eq!(Route::parse("/main"), Some(Route::Main(MainTab::Overview)));
        assert_eq!(Route::parse("/main/users/"), Some(Route::Main(MainTab::Users)));
        assert_eq!(Route::parse("/main/suppliers?busca=x"), Some(Route::Main(MainTab::Suppliers)));
        assert_eq!(Route::parse("/main/nada"), None);
        assert_eq!(Route::parse("/outra"), None);

        for tab in MainTab::ALL {
            let route = Route::Main(tab);
            assert_eq!(Route::parse(&route.path()), Some(route));
        }
    }

    #[test]
    fn test_declared_but_unimplemented_tabs() {
        assert!(MainTab::Users.is_implemented());
        assert!(!MainTab::Finance.is_implemented());
        assert!(Route::parse("/main/finance").is_some());
    }

    #[test]
    fn test_guard_redirects_when_logged_out() {
        use crate::storage::MemoryStore;
        use std::sync::Arc;

        let session = Session::new(Arc::new(MemoryStore::new()));
        assert_eq!(resolve("/main/clients", &session), Resolution::Redirect(Route::Login));
        assert_eq!(resolve("/login", &session), Resolution::Render(Route::Login));
        assert_eq!(resolve("/", &session), Resolution::Render(Route::Home));
        assert_eq!(resolve("/xyz", &session), Resolution::NotFound);
    }
}
