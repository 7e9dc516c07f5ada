//! Mutation logic for the module list embedded in a user record.
//!
//! All operations work on the in-memory list; the persistence layer reads
//! the user row, applies one of these, and writes the whole list back.

use uuid::Uuid;

use crate::models::ModuleMembership;

/// Attach a module to the list.
///
/// If a membership for `module_id` already exists it is reactivated in
/// place — the stored `titulo` is NOT refreshed. Otherwise a new active
/// entry is appended.
pub fn attach(modulos: &mut Vec<ModuleMembership>, module_id: Uuid, titulo: &str) {
    if let Some(existing) = modulos.iter_mut().find(|m| m.module_id == module_id) {
        existing.ativo = true;
        return;
    }
    modulos.push(ModuleMembership {
        module_id,
        titulo: titulo.to_string(),
        ativo: true,
    });
}

/// Set the active flag on an existing membership.
///
/// Returns `false` when no membership for `module_id` exists; the list is
/// untouched in that case.
#[must_use]
pub fn set_active(modulos: &mut [ModuleMembership], module_id: Uuid, ativo: bool) -> bool {
    match modulos.iter_mut().find(|m| m.module_id == module_id) {
        Some(m) => {
            m.ativo = ativo;
            true
        }
        None => false,
    }
}

/// Remove any membership for `module_id`. Removing a module that is not in
/// the list is a no-op.
pub fn detach(modulos: &mut Vec<ModuleMembership>, module_id: Uuid) {
    modulos.retain(|m| m.module_id != module_id);
}
