pub mod documents;

pub use documents::{
    build_item_document, build_model_document, substitute_placeholder, write_doll_documents,
    DollDocuments,
};
