use crate::{
    config::AuthConfig,
    db::{DbPool, OrmConn, orm_from_pool},
};

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub orm: OrmConn,
    pub auth: AuthConfig,
}

impl AppState {
    pub fn new(pool: DbPool, auth: AuthConfig) -> Self {
        let orm = orm_from_pool(&pool);
        Self { pool, orm, auth }
    }
}
