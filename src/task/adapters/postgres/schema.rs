//! Diesel schema for task persistence.

diesel::table! {
    /// Task documents in insertion order.
    tasks (id) {
        /// Document identifier.
        id -> Uuid,
        /// Insertion sequence defining store order.
        seq -> Int8,
        /// Public task identifier, unbounded like the domain key.
        task_id -> Text,
        /// Task title.
        #[max_length = 100]
        title -> Varchar,
        /// Task description.
        description -> Text,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
