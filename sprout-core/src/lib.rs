use std::sync::Arc;

use sprout_store::Store;

pub type Error = anyhow::Error;

/// Shared state handed to every command and event handler.
#[derive(Clone, Debug)]
pub struct Data {
    pub store: Arc<Store>,
}

pub type Context<'a> = poise::Context<'a, Data, Error>;
