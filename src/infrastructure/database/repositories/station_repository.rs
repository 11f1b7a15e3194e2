//! SeaORM implementation of StationRepository

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, DatabaseConnection, EntityTrait, QueryOrder, Set,
};

use super::db_err;
use crate::domain::station::{NewStation, Station, StationRepository};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::{company, station};

pub struct SeaOrmStationRepository {
    db: DatabaseConnection,
}

impl SeaOrmStationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: station::Model) -> Station {
    Station {
        id: m.id,
        name: m.name,
        address: m.address,
        latitude: m.latitude,
        longitude: m.longitude,
        phone: m.phone,
        opening_time: m.opening_time,
        closing_time: m.closing_time,
        available_slots: m.available_slots,
        rate_per_hour: m.rate_per_hour,
        company_id: m.company_id,
        created_at: m.created_at,
    }
}

#[async_trait]
impl StationRepository for SeaOrmStationRepository {
    async fn create(&self, s: NewStation) -> DomainResult<Station> {
        debug!("Creating station: {}", s.name);

        let model = station::ActiveModel {
            id: NotSet,
            name: Set(s.name),
            address: Set(s.address),
            latitude: Set(s.latitude),
            longitude: Set(s.longitude),
            phone: Set(s.phone),
            opening_time: Set(s.opening_time),
            closing_time: Set(s.closing_time),
            available_slots: Set(s.available_slots),
            rate_per_hour: Set(s.rate_per_hour),
            company_id: Set(s.company_id),
            created_at: Set(Utc::now()),
        };
        let saved = model.insert(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(saved))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Station>> {
        let model = station::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_all(&self) -> DomainResult<Vec<Station>> {
        let models = station::Entity::find()
            .order_by_asc(station::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn create_company(
        &self,
        name: String,
        contact_email: Option<String>,
    ) -> DomainResult<i32> {
        debug!("Creating company: {}", name);

        let model = company::ActiveModel {
            id: NotSet,
            name: Set(name),
            contact_email: Set(contact_email),
        };
        let saved = model.insert(&self.db).await.map_err(db_err)?;
        Ok(saved.id)
    }
}
