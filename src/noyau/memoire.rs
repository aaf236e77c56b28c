// src/noyau/memoire.rs
//
// Registre mémoire par session (MC / MR / MS / M+ / M-).

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use num_rational::BigRational;
use num_traits::Zero;

use super::erreurs::{CalcError, CalcResult};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemoryRegister(BigRational);

impl MemoryRegister {
    pub fn empty() -> Self {
        Self(BigRational::zero())
    }

    pub fn value(&self) -> &BigRational {
        &self.0
    }

    pub fn add(&self, delta: &BigRational) -> Self {
        Self(&self.0 + delta)
    }

    pub fn replace(&self, value: BigRational) -> Self {
        Self(value)
    }

    pub fn clear(&self) -> Self {
        Self::empty()
    }
}

impl Default for MemoryRegister {
    fn default() -> Self {
        Self::empty()
    }
}

pub trait MemoryStore {
    fn get_or_create(&self, session: &str) -> MemoryRegister;
    fn save(&self, session: &str, register: MemoryRegister);
    fn clear(&self, session: &str);
}

/// Stockage en mémoire vive, partageable entre threads.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    registres: Mutex<HashMap<String, MemoryRegister>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MemoryStore for InMemoryStore {
    fn get_or_create(&self, session: &str) -> MemoryRegister {
        let mut guard = self.registres.lock().unwrap_or_else(PoisonError::into_inner);
        guard.entry(session.to_string()).or_default().clone()
    }

    fn save(&self, session: &str, register: MemoryRegister) {
        let mut guard = self.registres.lock().unwrap_or_else(PoisonError::into_inner);
        guard.insert(session.to_string(), register);
    }

    fn clear(&self, session: &str) {
        let mut guard = self.registres.lock().unwrap_or_else(PoisonError::into_inner);
        guard.remove(session);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MemoryCommand {
    Clear,
    Recall,
    Store,
    Add,
    Subtract,
}

fn session_valide(session: &str) -> CalcResult<()> {
    if session.trim().is_empty() {
        return Err(CalcError::Validation("session id is required".into()));
    }
    Ok(())
}

/// Applique une commande mémoire et renvoie la nouvelle valeur du registre.
pub fn apply_memory_command(
    store: &dyn MemoryStore,
    session: &str,
    command: MemoryCommand,
    value: Option<BigRational>,
) -> CalcResult<BigRational> {
    session_valide(session)?;

    let requise = |v: Option<BigRational>| {
        v.ok_or_else(|| CalcError::Validation("value required".into()))
    };

    let registre = store.get_or_create(session);
    let resultat = match command {
        MemoryCommand::Clear => {
            store.clear(session);
            return Ok(BigRational::zero());
        }
        MemoryCommand::Recall => registre,
        MemoryCommand::Store => registre.replace(requise(value)?),
        MemoryCommand::Add => registre.add(&requise(value)?),
        MemoryCommand::Subtract => registre.add(&-requise(value)?),
    };

    store.save(session, resultat.clone());
    Ok(resultat.0)
}

pub fn recall_memory(store: &dyn MemoryStore, session: &str) -> CalcResult<BigRational> {
    session_valide(session)?;
    Ok(store.get_or_create(session).0)
}
