use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

pub fn parse_stamp(s: Option<&str>) -> Option<OffsetDateTime> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    OffsetDateTime::parse(s, &Rfc3339).ok()
}

pub fn is_set(s: Option<&str>) -> bool {
    s.is_some_and(|v| !v.trim().is_empty())
}

pub fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "<time>".to_string())
}
