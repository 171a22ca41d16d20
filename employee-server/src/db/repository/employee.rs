//! Employee Repository
//!
//! Parameterized queries over the `employees` table. Filtering, sorting and
//! paging are expressed through [`EmployeeFilter`] and [`PageRequest`] and
//! executed by [`find_page`]; the named paged finders are thin wrappers.

use super::{RepoError, RepoResult};
use shared::models::Employee;
use shared::request::{SortDirection, SortField};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, name, email, department";

/// Which rows a paged query selects
///
/// Name and department filters are case-insensitive literal substring matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmployeeFilter<'a> {
    All,
    Name(&'a str),
    Department(&'a str),
    NameAndDepartment { name: &'a str, department: &'a str },
}

impl<'a> EmployeeFilter<'a> {
    /// Pick the filter for optional name / department terms
    pub fn from_terms(name: Option<&'a str>, department: Option<&'a str>) -> Self {
        match (name, department) {
            (Some(name), Some(department)) => Self::NameAndDepartment { name, department },
            (Some(name), None) => Self::Name(name),
            (None, Some(department)) => Self::Department(department),
            (None, None) => Self::All,
        }
    }

    fn where_clause(&self) -> &'static str {
        match self {
            Self::All => "",
            Self::Name(_) => r" WHERE LOWER(name) LIKE '%' || LOWER(?) || '%' ESCAPE '\'",
            Self::Department(_) => {
                r" WHERE LOWER(department) LIKE '%' || LOWER(?) || '%' ESCAPE '\'"
            }
            Self::NameAndDepartment { .. } => {
                r" WHERE LOWER(name) LIKE '%' || LOWER(?) || '%' ESCAPE '\' AND LOWER(department) LIKE '%' || LOWER(?) || '%' ESCAPE '\'"
            }
        }
    }

    fn params(&self) -> Vec<String> {
        match self {
            Self::All => vec![],
            Self::Name(name) => vec![escape_like(name)],
            Self::Department(department) => vec![escape_like(department)],
            Self::NameAndDepartment { name, department } => {
                vec![escape_like(name), escape_like(department)]
            }
        }
    }
}

/// Page index, page size and ordering of a paged query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 0-based page index
    pub page: i64,
    /// Rows per page (> 0)
    pub size: i64,
    pub sort: SortField,
    pub direction: SortDirection,
}

impl PageRequest {
    /// Page ordered by id ascending
    pub fn new(page: i64, size: i64) -> Self {
        Self {
            page,
            size,
            sort: SortField::Id,
            direction: SortDirection::Asc,
        }
    }

    pub fn sorted(mut self, sort: SortField, direction: SortDirection) -> Self {
        self.sort = sort;
        self.direction = direction;
        self
    }

    pub fn offset(&self) -> i64 {
        self.page.max(0).saturating_mul(self.size)
    }

    /// `ceil(total / size)`; zero rows means zero pages
    pub fn total_pages(&self, total_items: i64) -> i64 {
        if self.size <= 0 || total_items <= 0 {
            return 0;
        }
        (total_items + self.size - 1) / self.size
    }

    fn order_clause(&self) -> String {
        match self.sort {
            SortField::Id => format!(" ORDER BY id {}", self.direction.as_sql()),
            field => format!(
                " ORDER BY {} {}, id ASC",
                field.as_str(),
                self.direction.as_sql()
            ),
        }
    }
}

/// One page of employees plus totals over the whole filtered set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeePage {
    pub employees: Vec<Employee>,
    pub total_items: i64,
    pub total_pages: i64,
}

/// Escape LIKE wildcards so the needle matches literally (escape char `\`)
pub fn escape_like(needle: &str) -> String {
    let mut out = String::with_capacity(needle.len());
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

// ── CRUD ──

/// Insert a new employee; the store assigns the id
pub async fn insert(
    pool: &SqlitePool,
    name: &str,
    email: &str,
    department: &str,
) -> RepoResult<Employee> {
    let employee = sqlx::query_as::<_, Employee>(&format!(
        "INSERT INTO employees (name, email, department) VALUES (?, ?, ?) RETURNING {COLUMNS}"
    ))
    .bind(name)
    .bind(email)
    .bind(department)
    .fetch_one(pool)
    .await?;
    Ok(employee)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Employee>> {
    let employee = sqlx::query_as::<_, Employee>(&format!(
        "SELECT {COLUMNS} FROM employees WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(employee)
}

/// Every employee, id order
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Employee>> {
    let employees = sqlx::query_as::<_, Employee>(&format!(
        "SELECT {COLUMNS} FROM employees ORDER BY id"
    ))
    .fetch_all(pool)
    .await?;
    Ok(employees)
}

/// Exact (case-sensitive) email match
pub async fn exists_by_email(pool: &SqlitePool, email: &str) -> RepoResult<bool> {
    let found: i64 =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM employees WHERE email = ?)")
            .bind(email)
            .fetch_one(pool)
            .await?;
    Ok(found != 0)
}

pub async fn exists_by_id(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let found: i64 = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM employees WHERE id = ?)")
        .bind(id)
        .fetch_one(pool)
        .await?;
    Ok(found != 0)
}

/// Overwrite name, email and department of an existing row
pub async fn update(
    pool: &SqlitePool,
    id: i64,
    name: &str,
    email: &str,
    department: &str,
) -> RepoResult<Employee> {
    sqlx::query_as::<_, Employee>(&format!(
        "UPDATE employees SET name = ?, email = ?, department = ? WHERE id = ? RETURNING {COLUMNS}"
    ))
    .bind(name)
    .bind(email)
    .bind(department)
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| RepoError::NotFound(format!("employee {id}")))
}

/// Hard delete; returns whether a row was removed
pub async fn delete_by_id(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let result = sqlx::query("DELETE FROM employees WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

// ── Paged queries ──

/// Count the filtered set, then fetch the requested page of it
pub async fn find_page(
    pool: &SqlitePool,
    filter: EmployeeFilter<'_>,
    page: PageRequest,
) -> RepoResult<EmployeePage> {
    if page.size <= 0 {
        return Err(RepoError::Validation(format!(
            "page size must be positive, got {}",
            page.size
        )));
    }

    let where_clause = filter.where_clause();
    let params = filter.params();

    let count_sql = format!("SELECT COUNT(*) FROM employees{where_clause}");
    let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
    for param in &params {
        count_query = count_query.bind(param);
    }
    let total_items = count_query.fetch_one(pool).await?;

    let select_sql = format!(
        "SELECT {COLUMNS} FROM employees{where_clause}{} LIMIT ? OFFSET ?",
        page.order_clause()
    );
    let mut select_query = sqlx::query_as::<_, Employee>(&select_sql);
    for param in &params {
        select_query = select_query.bind(param);
    }
    let employees = select_query
        .bind(page.size)
        .bind(page.offset())
        .fetch_all(pool)
        .await?;

    Ok(EmployeePage {
        employees,
        total_items,
        total_pages: page.total_pages(total_items),
    })
}

pub async fn find_all_paged(pool: &SqlitePool, page: PageRequest) -> RepoResult<EmployeePage> {
    find_page(pool, EmployeeFilter::All, page).await
}

pub async fn find_by_name_containing(
    pool: &SqlitePool,
    name: &str,
    page: PageRequest,
) -> RepoResult<EmployeePage> {
    find_page(pool, EmployeeFilter::Name(name), page).await
}

pub async fn find_by_department_containing(
    pool: &SqlitePool,
    department: &str,
    page: PageRequest,
) -> RepoResult<EmployeePage> {
    find_page(pool, EmployeeFilter::Department(department), page).await
}

pub async fn find_by_name_and_department_containing(
    pool: &SqlitePool,
    name: &str,
    department: &str,
    page: PageRequest,
) -> RepoResult<EmployeePage> {
    find_page(
        pool,
        EmployeeFilter::NameAndDepartment { name, department },
        page,
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        crate::db::migrate(&pool).await.unwrap();
        pool
    }

    async fn seed(pool: &SqlitePool) {
        for (name, email, dept) in [
            ("Ann Lee", "ann@x.com", "Engineering"),
            ("Bob Stone", "bob@x.com", "Sales"),
            ("Carl Engel", "carl@x.com", "Marketing"),
            ("Dana Fox", "dana@x.com", "engineering"),
            ("Eve 100%", "eve@x.com", "R_D"),
        ] {
            insert(pool, name, email, dept).await.unwrap();
        }
    }

    fn names(page: &EmployeePage) -> Vec<&str> {
        page.employees.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("plain"), "plain");
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like("c:\\dir"), "c:\\\\dir");
    }

    #[test]
    fn test_total_pages() {
        let page = PageRequest::new(0, 10);
        assert_eq!(page.total_pages(0), 0);
        assert_eq!(page.total_pages(1), 1);
        assert_eq!(page.total_pages(10), 1);
        assert_eq!(page.total_pages(11), 2);
        assert_eq!(PageRequest::new(3, 5).offset(), 15);
    }

    #[test]
    fn test_filter_from_terms() {
        assert_eq!(EmployeeFilter::from_terms(None, None), EmployeeFilter::All);
        assert_eq!(
            EmployeeFilter::from_terms(Some("a"), None),
            EmployeeFilter::Name("a")
        );
        assert_eq!(
            EmployeeFilter::from_terms(None, Some("d")),
            EmployeeFilter::Department("d")
        );
        assert_eq!(
            EmployeeFilter::from_terms(Some("a"), Some("d")),
            EmployeeFilter::NameAndDepartment {
                name: "a",
                department: "d"
            }
        );
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let pool = test_pool().await;
        let created = insert(&pool, "Ann", "ann@x.com", "Eng").await.unwrap();
        assert!(created.id > 0);
        assert_eq!(created.name, "Ann");

        let found = find_by_id(&pool, created.id).await.unwrap();
        assert_eq!(found, Some(created.clone()));
        assert!(exists_by_id(&pool, created.id).await.unwrap());
        assert!(!exists_by_id(&pool, created.id + 1).await.unwrap());
        assert_eq!(find_all(&pool).await.unwrap(), vec![created]);
    }

    #[tokio::test]
    async fn test_email_exists_is_case_sensitive() {
        let pool = test_pool().await;
        insert(&pool, "Ann", "ann@x.com", "Eng").await.unwrap();
        assert!(exists_by_email(&pool, "ann@x.com").await.unwrap());
        assert!(!exists_by_email(&pool, "ANN@x.com").await.unwrap());
    }

    #[tokio::test]
    async fn test_unique_email_violation_is_duplicate() {
        let pool = test_pool().await;
        insert(&pool, "Ann", "ann@x.com", "Eng").await.unwrap();
        let err = insert(&pool, "Other", "ann@x.com", "Ops").await.unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));
        assert_eq!(find_all(&pool).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let pool = test_pool().await;
        let ann = insert(&pool, "Ann", "ann@x.com", "Eng").await.unwrap();

        let updated = update(&pool, ann.id, "Ann B", "ann@x.com", "Ops").await.unwrap();
        assert_eq!(updated.id, ann.id);
        assert_eq!(updated.name, "Ann B");
        assert_eq!(updated.department, "Ops");

        let missing = update(&pool, ann.id + 100, "X", "x@x.com", "X").await;
        assert!(matches!(missing, Err(RepoError::NotFound(_))));

        assert!(delete_by_id(&pool, ann.id).await.unwrap());
        assert!(!delete_by_id(&pool, ann.id).await.unwrap());
        assert_eq!(find_by_id(&pool, ann.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_ids_not_reused_after_delete() {
        let pool = test_pool().await;
        let first = insert(&pool, "Ann", "ann@x.com", "Eng").await.unwrap();
        delete_by_id(&pool, first.id).await.unwrap();
        let second = insert(&pool, "Bob", "bob@x.com", "Eng").await.unwrap();
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn test_find_all_paged() {
        let pool = test_pool().await;
        seed(&pool).await;

        let page = find_all_paged(&pool, PageRequest::new(0, 2)).await.unwrap();
        assert_eq!(names(&page), vec!["Ann Lee", "Bob Stone"]);
        assert_eq!(page.total_items, 5);
        assert_eq!(page.total_pages, 3);

        let last = find_all_paged(&pool, PageRequest::new(2, 2)).await.unwrap();
        assert_eq!(names(&last), vec!["Eve 100%"]);

        let beyond = find_all_paged(&pool, PageRequest::new(9, 2)).await.unwrap();
        assert!(beyond.employees.is_empty());
        assert_eq!(beyond.total_items, 5);
    }

    #[tokio::test]
    async fn test_sorting() {
        let pool = test_pool().await;
        seed(&pool).await;

        let desc = PageRequest::new(0, 10).sorted(SortField::Name, SortDirection::Desc);
        let page = find_all_paged(&pool, desc).await.unwrap();
        assert_eq!(
            names(&page),
            vec!["Eve 100%", "Dana Fox", "Carl Engel", "Bob Stone", "Ann Lee"]
        );

        let by_id_desc = PageRequest::new(0, 1).sorted(SortField::Id, SortDirection::Desc);
        let page = find_all_paged(&pool, by_id_desc).await.unwrap();
        assert_eq!(names(&page), vec!["Eve 100%"]);
    }

    #[tokio::test]
    async fn test_name_search_is_case_insensitive() {
        let pool = test_pool().await;
        seed(&pool).await;

        let page = find_by_name_containing(&pool, "ENG", PageRequest::new(0, 10))
            .await
            .unwrap();
        assert_eq!(names(&page), vec!["Carl Engel"]);
        assert_eq!(page.total_items, 1);
    }

    #[tokio::test]
    async fn test_department_search() {
        let pool = test_pool().await;
        seed(&pool).await;

        let page = find_by_department_containing(&pool, "engineer", PageRequest::new(0, 10))
            .await
            .unwrap();
        assert_eq!(names(&page), vec!["Ann Lee", "Dana Fox"]);
    }

    #[tokio::test]
    async fn test_name_and_department_search_is_and() {
        let pool = test_pool().await;
        seed(&pool).await;

        let page =
            find_by_name_and_department_containing(&pool, "a", "eng", PageRequest::new(0, 10))
                .await
                .unwrap();
        assert_eq!(names(&page), vec!["Ann Lee", "Dana Fox"]);

        let none = find_by_name_and_department_containing(&pool, "Bob", "eng", PageRequest::new(0, 10))
            .await
            .unwrap();
        assert!(none.employees.is_empty());
        assert_eq!(none.total_pages, 0);
    }

    #[tokio::test]
    async fn test_wildcards_match_literally() {
        let pool = test_pool().await;
        seed(&pool).await;

        let percent = find_by_name_containing(&pool, "%", PageRequest::new(0, 10))
            .await
            .unwrap();
        assert_eq!(names(&percent), vec!["Eve 100%"]);

        let underscore = find_by_department_containing(&pool, "_", PageRequest::new(0, 10))
            .await
            .unwrap();
        assert_eq!(names(&underscore), vec!["Eve 100%"]);
    }

    #[tokio::test]
    async fn test_zero_size_rejected() {
        let pool = test_pool().await;
        let err = find_all_paged(&pool, PageRequest::new(0, 0)).await.unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));
    }
}
