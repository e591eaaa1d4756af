mod pending;

pub use pending::documents_pending;
