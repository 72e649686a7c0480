pub const NPDES_PERMIT_ID: &str = "npdes_permit_id";
pub const PERM_FEATURE_NMBR: &str = "perm_feature_nmbr";
pub const PARAMETER_DESC: &str = "parameter_desc";
pub const LIMIT_VALUE_TYPE_CODE: &str = "limit_value_type_code";
pub const STATISTICAL_BASE_CODE: &str = "statistical_base_code";
pub const LIMIT_BEGIN_DATE: &str = "limit_begin_date";

/// Columns kept in every limit dates file, in output order. Together they form
/// the deduplication key.
pub const LIMIT_DATE_COLUMNS: [&str; 6] = [
    NPDES_PERMIT_ID,
    PERM_FEATURE_NMBR,
    PARAMETER_DESC,
    LIMIT_VALUE_TYPE_CODE,
    STATISTICAL_BASE_CODE,
    LIMIT_BEGIN_DATE,
];

/// Leading column holding each row's position in the source file. The header
/// is left blank.
pub const ROW_INDEX_COLUMN: &str = "";

pub const INPUT_SUFFIX: &str = "_dmrs.csv";
pub const OUTPUT_SUFFIX: &str = "_limit_dates.csv";
