use std::collections::HashSet;

use chrono::Utc;
use storage::{
    Store,
    dto::{
        athlete::{AthleteResponse, CreateAthleteRequest, NamedReferenceUpdate, UpdateAthleteRequest},
        common::OneOrMany,
    },
    models::{AthleteChanges, NewAthlete},
};
use uuid::Uuid;

use crate::error::{WebError, WebResult};

/// Create one athlete or a batch of athletes.
///
/// Items are checked in order and the first failure aborts the whole
/// request before anything is written. Every staged row is then inserted
/// in a single transaction and reloaded. A single created athlete is
/// returned as one item, whether it was sent alone or as a batch of one.
pub async fn create_athletes<S>(
    store: &S,
    payload: OneOrMany<CreateAthleteRequest>,
) -> WebResult<OneOrMany<AthleteResponse>>
where
    S: Store + ?Sized,
{
    let requests = payload.into_vec();

    let mut staged = Vec::with_capacity(requests.len());
    let mut seen_cpfs = HashSet::with_capacity(requests.len());
    for request in &requests {
        let athlete = stage_athlete(store, request, &seen_cpfs).await?;
        seen_cpfs.insert(athlete.cpf.clone());
        staged.push(athlete);
    }

    store
        .insert_athletes(&staged)
        .await
        .map_err(|e| WebError::from_write(e, "create the athletes"))?;

    let mut created = Vec::with_capacity(staged.len());
    for athlete in &staged {
        match store.find_athlete_by_id(athlete.id).await? {
            Some(record) => created.push(AthleteResponse::from(record)),
            None => tracing::warn!(athlete_id = %athlete.id, "Created athlete vanished before reload"),
        }
    }

    tracing::info!(count = created.len(), "Athletes created");

    if created.len() > 1 {
        return Ok(OneOrMany::Many(created));
    }

    created.pop().map(OneOrMany::One).ok_or_else(|| {
        WebError::Unexpected("The created athletes could not be loaded.".to_string())
    })
}

/// Check one batch item and build the row to insert
async fn stage_athlete<S>(
    store: &S,
    request: &CreateAthleteRequest,
    seen_cpfs: &HashSet<String>,
) -> WebResult<NewAthlete>
where
    S: Store + ?Sized,
{
    let cpf = request.cpf.as_str();

    if seen_cpfs.contains(cpf) || store.find_athlete_by_cpf(cpf).await?.is_some() {
        tracing::warn!(cpf, "Rejected athlete batch with duplicate CPF");
        return Err(WebError::Conflict(format!(
            "An athlete with CPF '{cpf}' is already registered. The batch was not processed."
        )));
    }

    let category_name = request.categoria.nome.trim();
    let category = store
        .find_category_by_name(category_name)
        .await?
        .ok_or_else(|| {
            WebError::BadRequest(format!(
                "Category '{category_name}' was not found for the athlete with CPF '{cpf}'. \
                 The batch was not processed."
            ))
        })?;

    let center_name = request.centro_treinamento.nome.trim();
    let center = store
        .find_training_center_by_name(center_name)
        .await?
        .ok_or_else(|| {
            WebError::BadRequest(format!(
                "Training center '{center_name}' was not found for the athlete with CPF '{cpf}'. \
                 The batch was not processed."
            ))
        })?;

    Ok(NewAthlete {
        id: Uuid::new_v4(),
        name: request.nome.clone(),
        cpf: request.cpf.clone(),
        age: request.idade,
        weight: request.peso,
        height: request.altura,
        sex: request.sexo.clone(),
        created_at: Utc::now().naive_utc(),
        category_id: category.pk_id,
        training_center_id: center.pk_id,
    })
}

/// List all athletes
pub async fn list_athletes<S>(store: &S) -> WebResult<Vec<AthleteResponse>>
where
    S: Store + ?Sized,
{
    let athletes = store.list_athletes().await?;
    Ok(athletes.into_iter().map(AthleteResponse::from).collect())
}

/// Get athlete by external id
pub async fn get_athlete<S>(store: &S, id: Uuid) -> WebResult<AthleteResponse>
where
    S: Store + ?Sized,
{
    store
        .find_athlete_by_id(id)
        .await?
        .map(AthleteResponse::from)
        .ok_or_else(|| not_found(id))
}

/// Apply a partial update. Fields absent from the request keep their
/// stored value; references are resolved by name before anything is written.
pub async fn update_athlete<S>(
    store: &S,
    id: Uuid,
    request: &UpdateAthleteRequest,
) -> WebResult<AthleteResponse>
where
    S: Store + ?Sized,
{
    let existing = store
        .find_athlete_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let category_id = match &request.categoria {
        Some(reference) => {
            let name = reference_name(reference, "Category")?;
            let category = store.find_category_by_name(name).await?.ok_or_else(|| {
                WebError::BadRequest(format!("Category '{name}' was not found for update."))
            })?;
            Some(category.pk_id)
        }
        None => None,
    };

    let training_center_id = match &request.centro_treinamento {
        Some(reference) => {
            let name = reference_name(reference, "Training center")?;
            let center = store
                .find_training_center_by_name(name)
                .await?
                .ok_or_else(|| {
                    WebError::BadRequest(format!(
                        "Training center '{name}' was not found for update."
                    ))
                })?;
            Some(center.pk_id)
        }
        None => None,
    };

    let changes = AthleteChanges {
        age: request.idade,
        weight: request.peso,
        height: request.altura,
        category_id,
        training_center_id,
    };

    if !changes.is_empty() {
        store
            .update_athlete(existing.athlete.pk_id, &changes)
            .await
            .map_err(|e| WebError::from_write(e, "update the athlete"))?;
        tracing::info!(athlete_id = %id, "Athlete updated");
    }

    store
        .find_athlete_by_id(id)
        .await?
        .map(AthleteResponse::from)
        .ok_or_else(|| not_found(id))
}

/// Delete an athlete
pub async fn delete_athlete<S>(store: &S, id: Uuid) -> WebResult<()>
where
    S: Store + ?Sized,
{
    let athlete = store
        .find_athlete_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?;

    store
        .delete_athlete(athlete.athlete.pk_id)
        .await
        .map_err(|e| WebError::from_write(e, "delete the athlete"))?;

    tracing::info!(athlete_id = %id, "Athlete deleted");
    Ok(())
}

fn reference_name<'a>(reference: &'a NamedReferenceUpdate, kind: &str) -> WebResult<&'a str> {
    match reference.nome.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => Ok(name),
        _ => Err(WebError::BadRequest(format!(
            "{kind} name not provided for update."
        ))),
    }
}

fn not_found(id: Uuid) -> WebError {
    WebError::NotFound(format!("Athlete not found: {id}"))
}
