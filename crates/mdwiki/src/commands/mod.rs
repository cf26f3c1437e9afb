//! CLI command implementations.

pub(crate) mod export;
pub(crate) mod index;
pub(crate) mod page;
pub(crate) mod search;
pub(crate) mod toc;

pub(crate) use export::ExportArgs;
pub(crate) use page::FileArgs;
pub(crate) use search::SearchArgs;
pub(crate) use toc::TocArgs;
