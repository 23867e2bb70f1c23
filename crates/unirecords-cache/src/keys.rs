//! Query key generation.
//!
//! Every cached query is addressed by a [`QueryKey`]: an ordered list of typed
//! segments. Keys form a prefix hierarchy per resource family:
//!
//! ```text
//! all          [governance, departments]
//! lists        [governance, departments, list]
//! list(p)      [governance, departments, list, {facultyId=fac_1}]
//! details      [governance, departments, detail]
//! detail(id)   [governance, departments, detail, #dep_1]
//! by_code(c)   [governance, departments, detail, by-code, #CSC]
//! ```
//!
//! Invalidating a key invalidates every key it prefixes. `lists()` never
//! prefixes a detail key, a `detail(id)` never prefixes another id's key, and
//! code lookups sit beside (not under) the id-keyed details.
//!
//! Segments are typed so an id can never be mistaken for a scope word: the id
//! `"list"` yields `[.., detail, #list]`, which no list key starts with.

use std::fmt;

use unirecords_core::QueryParams;
use unirecords_models::{
    AdminUserListParams, AuditLogListParams, CourseId, CourseListParams, DepartmentId,
    DepartmentListParams, FacultyId, FacultyListParams, ResultId, ResultListParams, SessionId,
    SessionListParams, StaffId, StaffListParams, StudentId, StudentListParams, UserId,
};

/// One segment of a [`QueryKey`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeySegment {
    /// A fixed word naming a family or a sub-view.
    Scope(&'static str),
    /// An entity identifier or code.
    Id(String),
    /// List parameters as sorted name/value pairs.
    Params(Vec<(String, String)>),
    Number(i64),
    /// Placeholder for an optional argument that was not supplied.
    Absent,
}

impl fmt::Display for KeySegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scope(scope) => f.write_str(scope),
            Self::Id(id) => write!(f, "#{id}"),
            Self::Params(pairs) => {
                f.write_str("{")?;
                for (i, (name, value)) in pairs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{name}={value}")?;
                }
                f.write_str("}")
            }
            Self::Number(n) => write!(f, "{n}"),
            Self::Absent => f.write_str("-"),
        }
    }
}

/// Hierarchical cache key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryKey(Vec<KeySegment>);

impl QueryKey {
    pub fn new(segments: Vec<KeySegment>) -> Self {
        Self(segments)
    }

    /// Key made of scope words only.
    pub fn from_scopes(scopes: &[&'static str]) -> Self {
        Self(scopes.iter().copied().map(KeySegment::Scope).collect())
    }

    #[must_use]
    pub fn scope(mut self, scope: &'static str) -> Self {
        self.0.push(KeySegment::Scope(scope));
        self
    }

    #[must_use]
    pub fn id(mut self, id: impl AsRef<str>) -> Self {
        self.0.push(KeySegment::Id(id.as_ref().to_string()));
        self
    }

    /// Appends an optional id, keeping the position when it is absent.
    #[must_use]
    pub fn optional_id<I: AsRef<str>>(mut self, id: Option<I>) -> Self {
        self.0.push(match id {
            Some(id) => KeySegment::Id(id.as_ref().to_string()),
            None => KeySegment::Absent,
        });
        self
    }

    /// Appends list parameters. Pairs are sorted so the segment only depends
    /// on the parameter values, not on emission order.
    #[must_use]
    pub fn params<P: QueryParams + ?Sized>(mut self, params: &P) -> Self {
        let mut pairs: Vec<(String, String)> = params
            .query_pairs()
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect();
        pairs.sort();
        self.0.push(KeySegment::Params(pairs));
        self
    }

    #[must_use]
    pub fn number(mut self, n: i64) -> Self {
        self.0.push(KeySegment::Number(n));
        self
    }

    pub fn segments(&self) -> &[KeySegment] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether `prefix` is a (non-strict) prefix of this key.
    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{segment}")?;
        }
        f.write_str("]")
    }
}

/// The standard key set of one resource family, rooted at `path`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceFamily {
    path: &'static [&'static str],
}

impl ResourceFamily {
    pub const fn new(path: &'static [&'static str]) -> Self {
        Self { path }
    }

    pub fn all(&self) -> QueryKey {
        QueryKey::from_scopes(self.path)
    }

    pub fn lists(&self) -> QueryKey {
        self.all().scope("list")
    }

    pub fn list<P: QueryParams + ?Sized>(&self, params: &P) -> QueryKey {
        self.lists().params(params)
    }

    pub fn details(&self) -> QueryKey {
        self.all().scope("detail")
    }

    pub fn detail(&self, id: impl AsRef<str>) -> QueryKey {
        self.details().id(id)
    }

    /// Lookup by human-facing code. Lives under [`Self::details`] but never
    /// under any [`Self::detail`].
    pub fn by_code(&self, code: impl AsRef<str>) -> QueryKey {
        self.by_codes().id(code)
    }

    /// Prefix of every lookup by code.
    pub fn by_codes(&self) -> QueryKey {
        self.details().scope("by-code")
    }

    /// A family-wide sub-view such as statistics.
    pub fn scoped(&self, name: &'static str) -> QueryKey {
        self.all().scope(name)
    }
}

/// Generates the standard accessors of a resource family module with typed
/// ids and list parameters.
macro_rules! family_keys {
    ($path:expr, $id:ty, $params:ty) => {
        pub const FAMILY: ResourceFamily = ResourceFamily::new($path);

        pub fn all() -> QueryKey {
            FAMILY.all()
        }

        pub fn lists() -> QueryKey {
            FAMILY.lists()
        }

        pub fn list(params: &$params) -> QueryKey {
            FAMILY.list(params)
        }

        pub fn details() -> QueryKey {
            FAMILY.details()
        }

        pub fn detail(id: &$id) -> QueryKey {
            FAMILY.detail(id)
        }
    };
}

/// Root of faculties and departments.
pub mod governance {
    use super::*;

    pub fn all() -> QueryKey {
        QueryKey::from_scopes(&["governance"])
    }
}

pub mod faculties {
    use super::*;

    family_keys!(&["governance", "faculties"], FacultyId, FacultyListParams);

    pub fn by_code(code: &str) -> QueryKey {
        FAMILY.by_code(code)
    }

    pub fn by_codes() -> QueryKey {
        FAMILY.by_codes()
    }
}

pub mod departments {
    use super::*;

    family_keys!(&["governance", "departments"], DepartmentId, DepartmentListParams);

    pub fn by_code(code: &str) -> QueryKey {
        FAMILY.by_code(code)
    }

    pub fn by_codes() -> QueryKey {
        FAMILY.by_codes()
    }

    /// Department totals with and without a HOD.
    pub fn stats() -> QueryKey {
        FAMILY.scoped("stats")
    }
}

pub mod courses {
    use super::*;

    family_keys!(&["courses"], CourseId, CourseListParams);

    pub fn by_code(code: &str) -> QueryKey {
        FAMILY.by_code(code)
    }

    pub fn by_codes() -> QueryKey {
        FAMILY.by_codes()
    }

    /// Students registered on a course in one session.
    pub fn students(course_id: &CourseId, session_id: &SessionId) -> QueryKey {
        detail(course_id).scope("students").id(session_id)
    }
}

pub mod staff {
    use super::*;

    family_keys!(&["staff"], StaffId, StaffListParams);

    pub fn stats() -> QueryKey {
        FAMILY.scoped("stats")
    }

    /// Courses a staff member teaches.
    pub fn courses(staff_id: &StaffId) -> QueryKey {
        detail(staff_id).scope("courses")
    }
}

pub mod students {
    use super::*;

    family_keys!(&["students"], StudentId, StudentListParams);

    pub fn by_matric(matric_number: &str) -> QueryKey {
        by_matrics().id(matric_number)
    }

    /// Prefix of every lookup by matric number.
    pub fn by_matrics() -> QueryKey {
        FAMILY.details().scope("by-matric")
    }

    /// Prefix of every results view of one student.
    pub fn results_root(student_id: &StudentId) -> QueryKey {
        detail(student_id).scope("results")
    }

    pub fn results(student_id: &StudentId, session_id: Option<&SessionId>) -> QueryKey {
        results_root(student_id).optional_id(session_id)
    }

    pub fn transcript(student_id: &StudentId) -> QueryKey {
        detail(student_id).scope("transcript")
    }
}

pub mod results {
    use super::*;

    family_keys!(&["results"], ResultId, ResultListParams);

    /// Prefix of every semester view of one student.
    pub fn semesters(student_id: &StudentId) -> QueryKey {
        FAMILY.scoped("semester").id(student_id)
    }

    pub fn semester(student_id: &StudentId, session_id: &SessionId, semester: u8) -> QueryKey {
        semesters(student_id).id(session_id).number(i64::from(semester))
    }
}

pub mod sessions {
    use super::*;

    family_keys!(&["sessions"], SessionId, SessionListParams);

    /// The currently active session.
    pub fn active() -> QueryKey {
        FAMILY.scoped("active")
    }
}

/// Root of the administration views.
pub mod admin {
    use super::*;

    pub fn all() -> QueryKey {
        QueryKey::from_scopes(&["admin"])
    }

    /// Dashboard totals.
    pub fn stats() -> QueryKey {
        all().scope("stats")
    }
}

pub mod admin_users {
    use super::*;

    family_keys!(&["admin", "users"], UserId, AdminUserListParams);
}

pub mod audit_logs {
    use super::*;

    pub const FAMILY: ResourceFamily = ResourceFamily::new(&["admin", "audit-logs"]);

    pub fn all() -> QueryKey {
        FAMILY.all()
    }

    pub fn lists() -> QueryKey {
        FAMILY.lists()
    }

    pub fn list(params: &AuditLogListParams) -> QueryKey {
        FAMILY.list(params)
    }
}
