//! Migration v2: index for industry-by-year lookups

pub(super) const SQL: &str = "
CREATE INDEX IF NOT EXISTS idx_industry_year ON digi(industry_name, year);
";
