//! Migration v1: merged firm-year table

pub(super) const SQL: &str = "
CREATE TABLE IF NOT EXISTS digi (
    firm_code TEXT NOT NULL,
    firm_name TEXT NOT NULL,
    year INTEGER NOT NULL,
    industry_code TEXT NOT NULL,
    industry_name TEXT NOT NULL,
    composite_index REAL,
    normalized_index REAL,
    extra TEXT NOT NULL DEFAULT '{}'
);

CREATE INDEX IF NOT EXISTS idx_code ON digi(firm_code);
CREATE INDEX IF NOT EXISTS idx_year ON digi(year);
";
