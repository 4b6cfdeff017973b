// src/orchestrator/garden.rs
// In-memory plant collection for one user

use super::PlantUpdate;
use crate::error::GardenError;
use crate::plant::{Plant, PlantId, UserId};

#[derive(Debug, Clone)]
pub struct Garden {
    owner: UserId,
    plants: Vec<Plant>,
}

impl Garden {
    pub fn new(owner: UserId) -> Self {
        Self {
            owner,
            plants: Vec::new(),
        }
    }

    /// Add a plant under the plant-count ceiling.
    ///
    /// The plant is re-owned by this garden's user and gets its QR code id.
    pub fn add(&mut self, mut plant: Plant, entitled: bool, max_plants: usize) -> Result<PlantId, GardenError> {
        if self.plants.len() >= max_plants {
            return Err(if entitled {
                GardenError::PlantLimitReached { max: max_plants }
            } else {
                GardenError::SubscriptionRequired { max: max_plants }
            });
        }

        plant.owner_id = self.owner;
        if plant.qr_code.is_none() {
            plant.qr_code = Some(plant.id.to_string());
        }
        let id = plant.id;
        self.plants.push(plant);
        Ok(id)
    }

    pub fn remove(&mut self, id: PlantId) -> Result<Plant, GardenError> {
        let idx = self
            .plants
            .iter()
            .position(|p| p.id == id)
            .ok_or(GardenError::PlantNotFound(id))?;
        Ok(self.plants.remove(idx))
    }

    pub fn get(&self, id: PlantId) -> Option<&Plant> {
        self.plants.iter().find(|p| p.id == id)
    }

    pub fn get_mut(&mut self, id: PlantId) -> Result<&mut Plant, GardenError> {
        self.plants
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(GardenError::PlantNotFound(id))
    }

    pub fn update(&mut self, id: PlantId, update: PlantUpdate) -> Result<&Plant, GardenError> {
        let plant = self.get_mut(id)?;
        if let Some(nickname) = update.nickname {
            plant.nickname = nickname;
        }
        if let Some(species) = update.species {
            plant.species = species;
        }
        if let Some(persona) = update.persona {
            plant.persona = persona;
        }
        if let Some(location) = update.location {
            plant.location = location;
        }
        Ok(plant)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Plant> {
        self.plants.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Plant> {
        self.plants.iter_mut()
    }
}
