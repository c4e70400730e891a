mod api;
mod case;
mod collect;
mod config;
mod stamp;

pub use self::api::{
    AnalyzerInfo, ApiDiskUsage, Constant, ConstantEnums, DiskUsage, Envelope, Info,
    PendingDownloadKey,
};
pub use self::case::{CaseMetadata, CaseUpdate, NewCase};
pub use self::collect::{
    AnalysisStatus, Collection, CollectionAnalysis, Collector, CollectorImport, CollectorSecret,
    NewCollector, Profile,
};
pub use self::config::{ClientConfig, LocalState};
pub use self::stamp::{is_set, now_rfc3339, parse_stamp};
