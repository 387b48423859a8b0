use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{Result, StargazeError};

/// Wire format for every date the image source understands.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Number of calendar days covered by a "recent" fetch, today inclusive.
pub const RECENT_DAYS: u64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum MediaType {
    Image,
    Video,
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Image => write!(f, "image"),
            Self::Video => write!(f, "video"),
        }
    }
}

/// One "astronomy picture of the day" entry, in the image source's native
/// field layout so it can be passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ImageRecord {
    pub date: NaiveDate,
    pub explanation: String,
    #[serde(rename = "hdurl", default, skip_serializing_if = "Option::is_none")]
    pub hd_url: Option<String>,
    pub media_type: MediaType,
    pub service_version: String,
    pub title: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
}

impl ImageRecord {
    /// Key under which per-card state is tracked.
    pub fn key(&self) -> NaiveDate {
        self.date
    }
}

/// Gateway response: one record, or the upstream's ordered sequence for a
/// range request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(untagged)]
pub enum ImagePayload {
    Many(Vec<ImageRecord>),
    Single(ImageRecord),
}

impl ImagePayload {
    pub fn len(&self) -> usize {
        match self {
            Self::Many(records) => records.len(),
            Self::Single(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_records(self) -> Vec<ImageRecord> {
        match self {
            Self::Many(records) => records,
            Self::Single(record) => vec![record],
        }
    }
}

/// Inclusive calendar range, `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(StargazeError::Validation(format!(
                "start_date {} is after end_date {}",
                start.format(DATE_FORMAT),
                end.format(DATE_FORMAT)
            )));
        }
        Ok(Self { start, end })
    }

    /// The `RECENT_DAYS` days ending on `today`.
    pub fn recent(today: NaiveDate) -> Self {
        let start = today
            .checked_sub_days(Days::new(RECENT_DAYS - 1))
            .unwrap_or(NaiveDate::MIN);
        Self { start, end: today }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// Raw query string accepted by the image gateway.
#[derive(Debug, Clone, Default, Serialize, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ImageQueryParams {
    /// Single ISO date `YYYY-MM-DD`.
    pub date: Option<String>,
    /// Inclusive range start; only used together with `end_date`.
    pub start_date: Option<String>,
    /// Inclusive range end; only used together with `start_date`.
    pub end_date: Option<String>,
}

/// What the image gateway will ask the upstream for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageQuery {
    Today,
    Date(NaiveDate),
    Range(DateRange),
}

impl ImageQuery {
    /// Upstream query parameters, excluding the credential.
    pub fn upstream_params(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::Today => Vec::new(),
            Self::Date(date) => vec![("date", date.format(DATE_FORMAT).to_string())],
            Self::Range(range) => vec![
                ("start_date", range.start.format(DATE_FORMAT).to_string()),
                ("end_date", range.end.format(DATE_FORMAT).to_string()),
            ],
        }
    }
}

impl From<ImageQuery> for ImageQueryParams {
    fn from(query: ImageQuery) -> Self {
        let mut params = Self::default();
        for (name, value) in query.upstream_params() {
            match name {
                "date" => params.date = Some(value),
                "start_date" => params.start_date = Some(value),
                _ => params.end_date = Some(value),
            }
        }
        params
    }
}

impl TryFrom<ImageQueryParams> for ImageQuery {
    type Error = StargazeError;

    /// A complete range wins over `date`; a lone `start_date` or `end_date`
    /// is ignored. Empty values count as absent.
    fn try_from(params: ImageQueryParams) -> Result<Self> {
        let start = non_empty(params.start_date);
        let end = non_empty(params.end_date);
        let date = non_empty(params.date);

        if let (Some(start), Some(end)) = (start, end) {
            let range = DateRange::new(
                parse_date("start_date", &start)?,
                parse_date("end_date", &end)?,
            )?;
            return Ok(Self::Range(range));
        }

        match date {
            Some(date) => Ok(Self::Date(parse_date("date", &date)?)),
            None => Ok(Self::Today),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
        StargazeError::Validation(format!(
            "Invalid {field} '{value}', expected YYYY-MM-DD"
        ))
    })
}
