use storage::{
    TrainingCenterStore,
    dto::training_center::{CreateTrainingCenterRequest, TrainingCenterResponse},
    models::NewTrainingCenter,
};
use uuid::Uuid;

use crate::error::{WebError, WebResult};

/// Create a training center, rejecting names that are already taken
pub async fn create_training_center<S>(
    store: &S,
    request: &CreateTrainingCenterRequest,
) -> WebResult<TrainingCenterResponse>
where
    S: TrainingCenterStore + ?Sized,
{
    let name = request.nome.trim();

    if store.find_training_center_by_name(name).await?.is_some() {
        tracing::warn!(name, "Rejected duplicate training center");
        return Err(WebError::Conflict(format!(
            "A training center named '{name}' already exists."
        )));
    }

    let center = store
        .insert_training_center(&NewTrainingCenter {
            id: Uuid::new_v4(),
            name: name.to_string(),
            address: request.endereco.clone(),
            owner: request.proprietario.clone(),
        })
        .await
        .map_err(|e| WebError::from_write(e, "create the training center"))?;

    tracing::info!(training_center_id = %center.id, "Training center created");
    Ok(TrainingCenterResponse::from(center))
}

pub async fn list_training_centers<S>(store: &S) -> WebResult<Vec<TrainingCenterResponse>>
where
    S: TrainingCenterStore + ?Sized,
{
    let centers = store.list_training_centers().await?;
    Ok(centers.into_iter().map(TrainingCenterResponse::from).collect())
}

pub async fn get_training_center<S>(store: &S, id: Uuid) -> WebResult<TrainingCenterResponse>
where
    S: TrainingCenterStore + ?Sized,
{
    store
        .find_training_center_by_id(id)
        .await?
        .map(TrainingCenterResponse::from)
        .ok_or_else(|| not_found(id))
}

/// Delete a training center that no athlete references
pub async fn delete_training_center<S>(store: &S, id: Uuid) -> WebResult<()>
where
    S: TrainingCenterStore + ?Sized,
{
    let center = store
        .find_training_center_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let linked_athletes = store
        .count_athletes_in_training_center(center.pk_id)
        .await?;
    if linked_athletes > 0 {
        tracing::warn!(training_center_id = %id, linked_athletes, "Refused to delete training center in use");
        return Err(WebError::InUse {
            message: format!(
                "Cannot delete training center '{}': {} athlete(s) are currently linked to it.",
                center.name, linked_athletes
            ),
            linked_athletes,
        });
    }

    store
        .delete_training_center(center.pk_id)
        .await
        .map_err(|e| WebError::from_write(e, "delete the training center"))?;

    tracing::info!(training_center_id = %id, "Training center deleted");
    Ok(())
}

fn not_found(id: Uuid) -> WebError {
    WebError::NotFound(format!("Training center not found: {id}"))
}
