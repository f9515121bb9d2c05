use std::sync::atomic::{AtomicU32, Ordering};

/// Generates a unique schema name per test.
///
/// Each test gets a schema named `test_{process_id}_{test_counter}`, so tests
/// running in parallel against one database never share tables. Model table
/// names stay fixed; the test connection's `search_path` points into the
/// schema instead.
#[derive(Debug, Clone)]
pub struct TestIsolation {
    process_id: u32,
    test_counter: u32,
}

static TEST_COUNTER: AtomicU32 = AtomicU32::new(0);

impl TestIsolation {
    pub fn new() -> Self {
        Self {
            process_id: std::process::id(),
            test_counter: TEST_COUNTER.fetch_add(1, Ordering::Relaxed),
        }
    }

    pub fn schema(&self) -> String {
        format!("test_{}_{}", self.process_id, self.test_counter)
    }

    /// Statements creating the schema and making it the default for the
    /// session.
    pub fn setup_sql(&self) -> String {
        let schema = self.schema();
        format!("CREATE SCHEMA {schema}; SET search_path TO {schema};")
    }

    pub fn cleanup_sql(&self) -> String {
        format!("DROP SCHEMA IF EXISTS {} CASCADE;", self.schema())
    }
}

impl Default for TestIsolation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn isolation_generates_unique_schemas() {
        let isolation1 = TestIsolation::new();
        let isolation2 = TestIsolation::new();

        assert_ne!(isolation1.schema(), isolation2.schema());
        assert!(isolation1.schema().starts_with("test_"));
    }

    #[test]
    fn setup_and_cleanup_name_the_schema() {
        let isolation = TestIsolation::new();
        let schema = isolation.schema();

        assert!(isolation.setup_sql().contains(&format!("SET search_path TO {schema}")));
        assert_eq!(
            isolation.cleanup_sql(),
            format!("DROP SCHEMA IF EXISTS {schema} CASCADE;")
        );
    }
}
