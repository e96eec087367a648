//! `PostgreSQL` store implementation for task documents.

use super::{
    models::{NewTaskRow, TaskChangeset, TaskRow},
    schema::tasks,
};
use crate::task::{
    domain::{
        DocumentId, PersistedTaskData, Task, TaskDescription, TaskId, TaskPatch, TaskTitle,
    },
    ports::{
        InsertAck, TaskFilter, TaskPage, TaskPipeline, TaskStore, TaskStoreError,
        TaskStoreResult, UpdateOutcome,
    },
};
use async_trait::async_trait;
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// Schema bootstrap applied by [`PostgresTaskStore::ensure_schema`].
const CREATE_SCHEMA_SQL: &str =
    include_str!("../../../../migrations/2026-10-01-000000_create_tasks/up.sql");

/// Builds a connection pool for the given database URL.
///
/// # Errors
///
/// Returns [`PoolError`] when the pool cannot establish its connections.
pub fn build_pool(database_url: &str, max_size: u32) -> Result<TaskPgPool, PoolError> {
    Pool::builder()
        .max_size(max_size)
        .build(ConnectionManager::<PgConnection>::new(database_url))
}

/// `PostgreSQL`-backed task store.
#[derive(Debug, Clone)]
pub struct PostgresTaskStore {
    pool: TaskPgPool,
}

impl PostgresTaskStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    /// Creates the `tasks` table and its indexes when missing.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Persistence`] when the schema statements
    /// fail.
    pub async fn ensure_schema(&self) -> TaskStoreResult<()> {
        self.run_blocking(|connection| {
            connection
                .batch_execute(CREATE_SCHEMA_SQL)
                .map_err(TaskStoreError::persistence)
        })
        .await
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskStoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskStoreError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskStoreError::persistence)?
    }
}

impl From<DieselError> for TaskStoreError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl TaskStore for PostgresTaskStore {
    async fn insert(&self, task: &Task) -> TaskStoreResult<InsertAck> {
        let inserted_id = task.id();
        let task_id = task.task_id().clone();
        let new_row = to_new_row(task);

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskStoreError::DuplicateKey(task_id)
                    }
                    _ => TaskStoreError::persistence(err),
                })?;
            Ok(InsertAck { inserted_id })
        })
        .await
    }

    async fn find_one(&self, filter: &TaskFilter) -> TaskStoreResult<Option<Task>> {
        let task_id = filter.task_id().as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::task_id.eq(task_id))
                .order(tasks::seq.asc())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn update_one(
        &self,
        filter: &TaskFilter,
        patch: &TaskPatch,
        upsert: bool,
    ) -> TaskStoreResult<UpdateOutcome> {
        let task_id = filter.task_id().clone();
        let changeset = to_changeset(patch);
        let upsert_id = DocumentId::new();
        let upsert_row =
            Task::from_upsert(upsert_id, task_id.clone(), patch).map(|task| to_new_row(&task));

        self.run_blocking(move |connection| {
            connection.transaction::<_, TaskStoreError, _>(|connection| {
                let matched = diesel::update(
                    tasks::table.filter(tasks::task_id.eq(task_id.as_str().to_owned())),
                )
                .set(&changeset)
                .execute(connection)?;

                if matched > 0 || !upsert {
                    let count = to_count(matched);
                    return Ok(UpdateOutcome {
                        matched_count: count,
                        modified_count: count,
                        upserted_id: None,
                    });
                }

                let row = upsert_row.ok_or_else(|| TaskStoreError::IncompleteUpsert(task_id))?;
                let inserted = diesel::insert_into(tasks::table)
                    .values(&row)
                    .on_conflict(tasks::task_id)
                    .do_nothing()
                    .execute(connection)?;
                Ok(UpdateOutcome {
                    matched_count: 0,
                    modified_count: 0,
                    upserted_id: (inserted > 0).then_some(upsert_id),
                })
            })
        })
        .await
    }

    async fn delete_one(&self, filter: &TaskFilter) -> TaskStoreResult<u64> {
        let task_id = filter.task_id().as_str().to_owned();
        self.run_blocking(move |connection| {
            let deleted =
                diesel::delete(tasks::table.filter(tasks::task_id.eq(task_id))).execute(connection)?;
            Ok(to_count(deleted))
        })
        .await
    }

    async fn aggregate(&self, pipeline: &TaskPipeline) -> TaskStoreResult<Vec<TaskPage>> {
        let (offset, limit) = window_bounds(*pipeline);

        self.run_blocking(move |connection| {
            connection
                .build_transaction()
                .read_only()
                .repeatable_read()
                .run::<_, TaskStoreError, _>(|connection| {
                    let total: i64 = tasks::table.count().get_result(connection)?;
                    if total == 0 {
                        return Ok(Vec::new());
                    }

                    let rows = tasks::table
                        .order(tasks::seq.asc())
                        .offset(offset)
                        .limit(limit)
                        .select(TaskRow::as_select())
                        .load::<TaskRow>(connection)?;
                    let total_tasks = rows
                        .into_iter()
                        .map(row_to_task)
                        .collect::<TaskStoreResult<Vec<_>>>()?;
                    let total_count =
                        u64::try_from(total).map_err(TaskStoreError::persistence)?;
                    Ok(vec![TaskPage {
                        total_count,
                        total_tasks,
                    }])
                })
        })
        .await
    }
}

fn to_count(rows: usize) -> u64 {
    u64::try_from(rows).unwrap_or(u64::MAX)
}

/// `OFFSET`/`LIMIT` for a pipeline window. Positions beyond `i64::MAX` are
/// past any table end, so they saturate instead of failing.
fn window_bounds(pipeline: TaskPipeline) -> (i64, i64) {
    let offset = i64::try_from(pipeline.start_index()).unwrap_or(i64::MAX);
    let limit = i64::try_from(pipeline.limit()).unwrap_or(i64::MAX);
    (offset, limit)
}

fn to_new_row(task: &Task) -> NewTaskRow {
    NewTaskRow {
        id: task.id().into_inner(),
        task_id: task.task_id().as_str().to_owned(),
        title: task.title().as_str().to_owned(),
        description: task.description().as_str().to_owned(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    }
}

fn to_changeset(patch: &TaskPatch) -> TaskChangeset {
    TaskChangeset {
        title: patch.title().map(|title| title.as_str().to_owned()),
        description: patch
            .description()
            .map(|description| description.as_str().to_owned()),
        updated_at: patch.updated_at(),
    }
}

fn row_to_task(row: TaskRow) -> TaskStoreResult<Task> {
    let TaskRow {
        id,
        task_id,
        title,
        description,
        created_at,
        updated_at,
    } = row;

    let data = PersistedTaskData {
        id: DocumentId::from_uuid(id),
        task_id: TaskId::new(task_id).map_err(TaskStoreError::persistence)?,
        title: TaskTitle::new(title).map_err(TaskStoreError::persistence)?,
        description: TaskDescription::new(description).map_err(TaskStoreError::persistence)?,
        created_at,
        updated_at,
    };
    Ok(Task::from_persisted(data))
}
