mod tab_id_generator;

pub use tab_id_generator::*;

/// Trait for generating identifiers.
///
/// Generic over the target type so the same generator can mint a [`TabId`](crate::TabId)
/// or a plain `String`.
pub trait IdGenerator<T>: Send + Sync
where
    T: From<String>,
{
    fn generate(&self) -> T;
}
