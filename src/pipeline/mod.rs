// Pipelines that move data from the outside world into the store.

pub mod ingest;
