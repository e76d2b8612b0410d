use crate::domain::entities::account::CurrentUser;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    SignIn,
    Import,
    History,
    Projects,
    Statistics,
    Facilities,
    Account,
    Users,
}

impl Route {
    pub fn label(self) -> &'static str {
        match self {
            Route::SignIn => "Connexion",
            Route::Import => "Importer",
            Route::History => "Historique",
            Route::Projects => "Projets",
            Route::Statistics => "Statistiques",
            Route::Facilities => "Facilités",
            Route::Account => "Mon compte",
            Route::Users => "Utilisateurs",
        }
    }

    fn requires_user(self) -> bool {
        !matches!(self, Route::SignIn)
    }

    fn requires_admin(self) -> bool {
        matches!(self, Route::Users)
    }
}

pub const HOME: Route = Route::Import;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    pub user: Option<CurrentUser>,
}

impl SessionContext {
    pub fn signed_in(user: CurrentUser) -> Self {
        Self { user: Some(user) }
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(|user| user.admin)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    Allow(Route),
    Redirect(Route),
}

impl RouteDecision {
    pub fn target(self) -> Route {
        match self {
            RouteDecision::Allow(route) | RouteDecision::Redirect(route) => route,
        }
    }
}

pub fn resolve_route(route: Route, ctx: &SessionContext) -> RouteDecision {
    if route.requires_user() && ctx.user.is_none() {
        return RouteDecision::Redirect(Route::SignIn);
    }
    if route.requires_admin() && !ctx.is_admin() {
        return RouteDecision::Redirect(HOME);
    }
    RouteDecision::Allow(route)
}

pub fn visible_routes(ctx: &SessionContext) -> Vec<Route> {
    [
        Route::Import,
        Route::History,
        Route::Projects,
        Route::Statistics,
        Route::Facilities,
        Route::Account,
        Route::Users,
    ]
    .into_iter()
    .filter(|route| matches!(resolve_route(*route, ctx), RouteDecision::Allow(_)))
    .collect()
}
