use serde::Deserialize;

/// Yahoo's `{ "raw": ..., "fmt": ... }` number wrapper.
#[derive(Deserialize, Clone, Copy, Debug)]
pub(crate) struct RawNum<T> {
    pub(crate) raw: Option<T>,
}

pub(crate) fn from_raw<T>(raw: Option<RawNum<T>>) -> Option<T> {
    raw.and_then(|n| n.raw)
}

/// Yahoo's `{ "raw": <unix seconds>, "fmt": "2024-03-31" }` date wrapper.
#[derive(Deserialize, Clone, Copy, Debug)]
pub(crate) struct RawDate {
    pub(crate) raw: Option<i64>,
}

pub(crate) fn from_raw_date(r: Option<RawDate>) -> Option<i64> {
    r.and_then(|d| d.raw)
}
