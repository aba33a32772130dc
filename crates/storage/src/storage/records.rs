//! Read-only queries over the merged firm-year table.

use digidash_core::{FirmYearRecord, RecordFilter};
use rusqlite::ToSql;

use super::{get_conn, log_row_error, map_record, Storage, RECORD_COLUMNS};
use crate::{Result, TableStats};

/// Builds the WHERE clause for `filter` together with its bind values, in order.
///
/// Name filters are case-sensitive substring tests; `instr` takes the input
/// literally, so `%` and `_` need no escaping.
fn where_clause(filter: &RecordFilter) -> (String, Vec<Box<dyn ToSql>>) {
    let mut sql = String::from(" WHERE 1=1");
    let mut args: Vec<Box<dyn ToSql>> = Vec::new();

    if let Some(code) = &filter.firm_code {
        sql.push_str(" AND firm_code = ?");
        args.push(Box::new(code.clone()));
    }
    if let Some(year) = filter.year {
        sql.push_str(" AND year = ?");
        args.push(Box::new(year));
    }
    if let Some(name) = &filter.firm_name {
        sql.push_str(" AND instr(firm_name, ?) > 0");
        args.push(Box::new(name.clone()));
    }
    if let Some(code) = &filter.industry_code {
        sql.push_str(" AND UPPER(industry_code) = UPPER(?)");
        args.push(Box::new(code.clone()));
    }
    if let Some(name) = &filter.industry_name {
        sql.push_str(" AND instr(industry_name, ?) > 0");
        args.push(Box::new(name.clone()));
    }

    (sql, args)
}

impl Storage {
    /// Returns every record matching `filter`, ordered by firm code then year.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn query_records(&self, filter: &RecordFilter) -> Result<Vec<FirmYearRecord>> {
        self.query_records_limited(filter, None)
    }

    /// Like [`Storage::query_records`] with an optional row cap.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn query_records_limited(
        &self,
        filter: &RecordFilter,
        limit: Option<usize>,
    ) -> Result<Vec<FirmYearRecord>> {
        let (clause, mut args) = where_clause(filter);
        let mut sql = format!("SELECT {RECORD_COLUMNS} FROM digi{clause} ORDER BY firm_code, year");
        if let Some(limit) = limit {
            sql.push_str(" LIMIT ?");
            args.push(Box::new(limit as i64));
        }

        let conn = get_conn(&self.pool)?;
        let mut stmt = conn.prepare(&sql)?;
        let params: Vec<&dyn ToSql> = args.iter().map(|a| &**a).collect();
        let results = stmt
            .query_map(params.as_slice(), map_record)?
            .filter_map(log_row_error)
            .collect();
        Ok(results)
    }

    /// Counts records matching `filter`.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn count_records(&self, filter: &RecordFilter) -> Result<u64> {
        let (clause, args) = where_clause(filter);
        let sql = format!("SELECT COUNT(*) FROM digi{clause}");
        let conn = get_conn(&self.pool)?;
        let params: Vec<&dyn ToSql> = args.iter().map(|a| &**a).collect();
        let count: i64 = conn.query_row(&sql, params.as_slice(), |row| row.get(0))?;
        Ok(count as u64)
    }

    /// Whether the table holds at least one row.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn is_populated(&self) -> Result<bool> {
        let conn = get_conn(&self.pool)?;
        let exists: bool =
            conn.query_row("SELECT EXISTS(SELECT 1 FROM digi LIMIT 1)", [], |row| row.get(0))?;
        Ok(exists)
    }

    /// Get table statistics.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn stats(&self) -> Result<TableStats> {
        let conn = get_conn(&self.pool)?;
        let stats = conn.query_row(
            "SELECT COUNT(*), COUNT(DISTINCT firm_code), COUNT(DISTINCT industry_code),
                    MIN(year), MAX(year)
               FROM digi",
            [],
            |row| {
                Ok(TableStats {
                    rows: row.get::<_, i64>(0)? as u64,
                    firms: row.get::<_, i64>(1)? as u64,
                    industries: row.get::<_, i64>(2)? as u64,
                    first_year: row.get(3)?,
                    last_year: row.get(4)?,
                })
            },
        )?;
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_has_no_conditions() {
        let (sql, args) = where_clause(&RecordFilter::default());
        assert_eq!(sql, " WHERE 1=1");
        assert!(args.is_empty());
    }

    #[test]
    fn clauses_follow_fixed_order() {
        let filter = RecordFilter::default()
            .industry_name(Some("医药"))
            .year(Some(2020))
            .firm_code(Some("600000"));
        let (sql, args) = where_clause(&filter);
        assert_eq!(
            sql,
            " WHERE 1=1 AND firm_code = ? AND year = ? AND instr(industry_name, ?) > 0"
        );
        assert_eq!(args.len(), 3);
    }
}
