pub(crate) mod ingest;
pub(crate) mod query;
pub(crate) mod serve;
