use std::collections::HashMap;

use async_trait::async_trait;
use shared_types::{NewTodo, Todo};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{StoreError, TodoFields, TodoStore};

#[derive(Default)]
struct Collection {
    todos: HashMap<Uuid, Todo>,
    unique_titles: bool,
}

impl Collection {
    fn title_taken(&self, title: &str, exclude_id: Option<Uuid>) -> bool {
        self.todos
            .values()
            .any(|t| t.title == title && Some(t.id) != exclude_id)
    }
}

/// In-memory to-do store.
///
/// Behaves like the Postgres store, including the unique title index: once
/// [`TodoStore::ensure_unique_title_index`] has run, writes that would duplicate
/// a title fail with [`StoreError::DuplicateKey`].
#[derive(Default)]
pub struct InMemoryTodoStore {
    collection: RwLock<Collection>,
}

impl InMemoryTodoStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.collection.read().await.todos.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl TodoStore for InMemoryTodoStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn ensure_unique_title_index(&self) -> Result<(), StoreError> {
        let mut collection = self.collection.write().await;
        let duplicate = {
            let mut seen = std::collections::HashSet::new();
            collection
                .todos
                .values()
                .find(|t| !seen.insert(t.title.as_str()))
                .map(|t| t.title.clone())
        };
        if let Some(title) = duplicate {
            return Err(StoreError::DuplicateKey(format!(
                "cannot build unique index, title {title:?} is stored twice"
            )));
        }
        collection.unique_titles = true;
        Ok(())
    }

    async fn find_by_title(
        &self,
        title: &str,
        exclude_id: Option<Uuid>,
    ) -> Result<Option<Todo>, StoreError> {
        let collection = self.collection.read().await;
        Ok(collection
            .todos
            .values()
            .find(|t| t.title == title && Some(t.id) != exclude_id)
            .cloned())
    }

    async fn insert(&self, todo: &NewTodo) -> Result<Uuid, StoreError> {
        let mut collection = self.collection.write().await;
        if collection.unique_titles && collection.title_taken(&todo.title, None) {
            return Err(StoreError::DuplicateKey(format!("title {:?}", todo.title)));
        }
        let id = Uuid::new_v4();
        collection.todos.insert(id, todo.clone().with_id(id));
        Ok(id)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Todo>, StoreError> {
        Ok(self.collection.read().await.todos.get(&id).cloned())
    }

    async fn update_fields(&self, id: Uuid, fields: &TodoFields) -> Result<u64, StoreError> {
        let mut collection = self.collection.write().await;
        if let Some(title) = &fields.title {
            if collection.unique_titles
                && collection.todos.contains_key(&id)
                && collection.title_taken(title, Some(id))
            {
                return Err(StoreError::DuplicateKey(format!("title {:?}", title)));
            }
        }
        match collection.todos.get_mut(&id) {
            Some(todo) => {
                fields.apply_to(todo);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<u64, StoreError> {
        let mut collection = self.collection.write().await;
        Ok(collection.todos.remove(&id).map_or(0, |_| 1))
    }

    async fn find_all(&self) -> Result<Vec<Todo>, StoreError> {
        let collection = self.collection.read().await;
        let mut todos: Vec<Todo> = collection.todos.values().cloned().collect();
        todos.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(todos)
    }
}
