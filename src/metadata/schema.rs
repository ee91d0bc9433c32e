use super::*;

/// Point-in-time table/column catalog handed in by the host application.
///
/// The engine only ever reads it. Table names are looked up ASCII
/// case-insensitively because SQL identifiers typed in the editor rarely match
/// the catalog's casing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaSnapshot {
    tables: Vec<Table>,
}

impl SchemaSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`SchemaSnapshot::insert_table`].
    pub fn with_table(
        mut self,
        name: impl Into<String>,
        columns: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.insert_table(Table::new_with_ordered(name, columns));
        self
    }

    /// Insert a table, replacing any table with the same (case-insensitive) name.
    pub fn insert_table(&mut self, table: Table) {
        match self
            .tables
            .iter_mut()
            .find(|t| t.name.eq_ignore_ascii_case(&table.name))
        {
            Some(existing) => *existing = table,
            None => self.tables.push(table),
        }
    }

    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name.eq_ignore_ascii_case(name))
    }

    /// Tables in insertion order.
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.tables.iter()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl<N, C, I> FromIterator<(N, I)> for SchemaSnapshot
where
    N: Into<String>,
    C: Into<String>,
    I: IntoIterator<Item = C>,
{
    fn from_iter<T: IntoIterator<Item = (N, I)>>(iter: T) -> Self {
        let mut schema = Self::new();
        for (name, columns) in iter {
            schema.insert_table(Table::new_with_ordered(name, columns));
        }
        schema
    }
}
