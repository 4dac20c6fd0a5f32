/// The two pages of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Route {
    #[default]
    List,
    AddModel,
}

impl Route {
    pub const ALL: [Route; 2] = [Route::List, Route::AddModel];

    pub fn path(self) -> &'static str {
        match self {
            Route::List => "/",
            Route::AddModel => "/add-model",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        Route::ALL.into_iter().find(|route| route.path() == path)
    }
}

#[cfg(test)]
mod tests {
    use super::Route;

    #[test]
    fn paths_resolve_back_to_routes() {
        assert_eq!(Route::from_path("/"), Some(Route::List));
        assert_eq!(Route::from_path("/add-model"), Some(Route::AddModel));
        assert_eq!(Route::from_path("/models"), None);
        assert_eq!(Route::default(), Route::List);
    }
}
