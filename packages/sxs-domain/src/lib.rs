pub mod formatter;
pub mod gsa;
pub mod judgment;
pub mod profile;
pub mod query;
pub mod result;

mod error;

pub use error::{Error, Result};
pub use formatter::{FormatterKind, GsaFormatter, QueryFormatter, UrlPrefixFormatter};
pub use judgment::{Judgment, JudgmentRecord};
pub use profile::{ScoringPolicyProfile, profiles_from_config};
pub use query::{PolicyConfig, QueryArguments, QueryOptions};
pub use result::{FingerprintSink, ResultsStore, SIZE_UNKNOWN, SearchResult, fingerprint};
