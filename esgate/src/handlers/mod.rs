//! Request handlers for the gateway API

mod documents;
mod indexes;

pub use documents::{
    delete_document_handler, get_document_handler, search_documents_handler,
    upsert_document_handler,
};
pub use indexes::{
    create_index_handler, delete_index_handler, get_index_handler, list_indices_handler,
    root_handler,
};
