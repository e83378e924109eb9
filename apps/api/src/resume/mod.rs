// Résumé core: document store, ATS validation, import/export, and the HTTP
// handlers the editor and preview talk to.

pub mod handlers;
pub mod merge;
pub mod paths;
pub mod store;
pub mod transfer;
pub mod validation;
