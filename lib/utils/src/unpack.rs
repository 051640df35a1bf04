use leptos::prelude::*;

use crate::errors::AppError;

/// Stores the result of a load in `loaded_vec` or `load_error`.
/// A successful load clears the previous error, a failed one clears the previously loaded elements.
pub fn handle_initial_load<T: Clone + Send + Sync + 'static>(
    load_result: Result<Vec<T>, AppError>,
    loaded_vec: RwSignal<Vec<T>>,
    load_error: RwSignal<Option<AppError>>,
) {
    match load_result {
        Ok(init_vec) => {
            loaded_vec.set(init_vec);
            load_error.set(None);
        },
        Err(e) => {
            loaded_vec.write().clear();
            load_error.set(Some(e))
        },
    };
}
