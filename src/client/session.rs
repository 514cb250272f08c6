use super::{
    ClientError,
    storage::{TOKEN_KEY, TokenStore},
};

/// The current bearer token, mirrored into a [`TokenStore`].
#[derive(Debug)]
pub struct Session<S> {
    token: Option<String>,
    store: S,
}

impl<S: TokenStore> Session<S> {
    /// An anonymous session; whatever is in `store` is left untouched.
    pub fn new(store: S) -> Self {
        Self { token: None, store }
    }

    /// Token persisted by a previous session, if any.
    pub fn stored_token(&self) -> Result<Option<String>, ClientError> {
        Ok(self
            .store
            .get_item(TOKEN_KEY)?
            .filter(|t| !t.trim().is_empty()))
    }

    /// Load the persisted token into memory. Returns whether one was found.
    pub fn restore(&mut self) -> Result<bool, ClientError> {
        self.token = self.stored_token()?;
        Ok(self.token.is_some())
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn set_token(&mut self, token: impl Into<String>) -> Result<(), ClientError> {
        let token = token.into();
        self.store.set_item(TOKEN_KEY, &token)?;
        self.token = Some(token);
        Ok(())
    }

    pub fn clear(&mut self) -> Result<(), ClientError> {
        self.token = None;
        self.store.remove_item(TOKEN_KEY)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
