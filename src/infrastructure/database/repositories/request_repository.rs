//! SeaORM implementation of RequestRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::sea_query::{CaseStatement, Expr, Func, LikeExpr, Order, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select, Set,
};

use crate::domain::request::{
    AssignedRequest, GuestRequest, Priority, RequestQuery, RequestRepository, RequestStatus,
    RequestType, SortField, SortOrder,
};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{employee, guest_request};
use crate::support::pagination::PaginatedResult;

use super::{corrupt, db_err, employee_repository};

pub struct SeaOrmRequestRepository {
    db: DatabaseConnection,
}

impl SeaOrmRequestRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: guest_request::Model) -> DomainResult<GuestRequest> {
    Ok(GuestRequest {
        request_type: m
            .request_type
            .parse()
            .map_err(|_| corrupt("guest_requests.request_type", &m.request_type))?,
        status: m
            .status
            .parse()
            .map_err(|_| corrupt("guest_requests.status", &m.status))?,
        priority: m
            .priority
            .parse()
            .map_err(|_| corrupt("guest_requests.priority", &m.priority))?,
        id: m.id,
        hotel_id: m.hotel_id,
        guest_name: m.guest_name,
        room_number: m.room_number,
        description: m.description,
        assigned_to_id: m.assigned_to_id,
        created_at: m.created_at,
        updated_at: m.updated_at,
        estimated_completion: m.estimated_completion,
    })
}

fn joined_to_domain(
    (request, assignee): (guest_request::Model, Option<employee::Model>),
) -> DomainResult<AssignedRequest> {
    Ok(AssignedRequest {
        request: model_to_domain(request)?,
        assigned_to: assignee.map(employee_repository::model_to_domain).transpose()?,
    })
}

fn domain_to_active(r: GuestRequest) -> guest_request::ActiveModel {
    guest_request::ActiveModel {
        id: Set(r.id),
        hotel_id: Set(r.hotel_id),
        guest_name: Set(r.guest_name),
        room_number: Set(r.room_number),
        request_type: Set(r.request_type.as_str().to_string()),
        description: Set(r.description),
        status: Set(r.status.as_str().to_string()),
        priority: Set(r.priority.as_str().to_string()),
        assigned_to_id: Set(r.assigned_to_id),
        created_at: Set(r.created_at),
        updated_at: Set(r.updated_at),
        estimated_completion: Set(r.estimated_completion),
    }
}

/// Maps a string column to the declaration index of its enum value.
fn rank_expr(column: guest_request::Column, values: &[&'static str]) -> SimpleExpr {
    let case = values
        .iter()
        .enumerate()
        .fold(CaseStatement::new(), |case, (rank, value)| {
            case.case(
                Expr::col((guest_request::Entity, column)).eq(*value),
                SimpleExpr::Value((rank as i32).into()),
            )
        })
        .finally(SimpleExpr::Value((values.len() as i32).into()));
    case.into()
}

fn sort_expr(field: SortField) -> SimpleExpr {
    use guest_request::Column;

    match field {
        SortField::CreatedAt => Expr::col((guest_request::Entity, Column::CreatedAt)).into(),
        SortField::RoomNumber => Expr::col((guest_request::Entity, Column::RoomNumber)).into(),
        SortField::GuestName => Expr::col((guest_request::Entity, Column::GuestName)).into(),
        SortField::Priority => rank_expr(Column::Priority, &Priority::ALL.map(|p| p.as_str())),
        SortField::Status => rank_expr(Column::Status, &RequestStatus::ALL.map(|s| s.as_str())),
        SortField::RequestType => {
            rank_expr(Column::RequestType, &RequestType::ALL.map(|t| t.as_str()))
        }
    }
}

/// `%needle%` with LIKE wildcards in the needle escaped.
fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn filtered(query: &RequestQuery) -> Select<guest_request::Entity> {
    use guest_request::Column;

    let f = &query.filter;
    let mut select = guest_request::Entity::find().filter(Column::HotelId.eq(query.hotel_id.as_str()));

    if let Some(status) = f.status {
        select = select.filter(Column::Status.eq(status.as_str()));
    }
    if let Some(request_type) = f.request_type {
        select = select.filter(Column::RequestType.eq(request_type.as_str()));
    }
    if let Some(priority) = f.priority {
        select = select.filter(Column::Priority.eq(priority.as_str()));
    }
    if let Some(assignee) = &f.assigned_to_id {
        select = select.filter(Column::AssignedToId.eq(assignee.as_str()));
    }
    if let Some(room) = &f.room_number {
        select = select.filter(
            Expr::expr(Func::lower(Expr::col((guest_request::Entity, Column::RoomNumber))))
                .like(LikeExpr::new(contains_pattern(room)).escape('\\')),
        );
    }
    select
}

// ── RequestRepository impl ──────────────────────────────────────

#[async_trait]
impl RequestRepository for SeaOrmRequestRepository {
    async fn save(&self, r: GuestRequest) -> DomainResult<()> {
        debug!("Saving guest request: {} (hotel {})", r.id, r.hotel_id);

        domain_to_active(r).insert(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<GuestRequest>> {
        let model = guest_request::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(db_err)?;
        model.map(model_to_domain).transpose()
    }

    async fn update(&self, r: GuestRequest) -> DomainResult<()> {
        debug!("Updating guest request: {}", r.id);

        let existing = guest_request::Entity::find_by_id(r.id.clone())
            .one(&self.db)
            .await
            .map_err(db_err)?;

        if existing.is_none() {
            return Err(DomainError::not_found("Request", r.id));
        }

        domain_to_active(r).update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> DomainResult<bool> {
        debug!("Deleting guest request: {}", id);

        let result = guest_request::Entity::delete_by_id(id.to_string())
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected > 0)
    }

    async fn search(&self, query: &RequestQuery) -> DomainResult<PaginatedResult<AssignedRequest>> {
        let select = filtered(query);
        let total = select.clone().count(&self.db).await.map_err(db_err)?;

        let order = match query.sort.order {
            SortOrder::Asc => Order::Asc,
            SortOrder::Desc => Order::Desc,
        };

        let rows = select
            .find_also_related(employee::Entity)
            .order_by(sort_expr(query.sort.field), order)
            .order_by_asc(guest_request::Column::Id)
            .offset(query.page.offset())
            .limit(query.page.limit)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let items = rows
            .into_iter()
            .map(joined_to_domain)
            .collect::<DomainResult<Vec<_>>>()?;
        Ok(PaginatedResult::new(items, total, query.page))
    }

    async fn find_by_room(
        &self,
        hotel_id: &str,
        room_number: &str,
    ) -> DomainResult<Vec<AssignedRequest>> {
        let rows = guest_request::Entity::find()
            .filter(guest_request::Column::HotelId.eq(hotel_id))
            .filter(guest_request::Column::RoomNumber.eq(room_number))
            .find_also_related(employee::Entity)
            .order_by_desc(guest_request::Column::CreatedAt)
            .order_by_asc(guest_request::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        rows.into_iter().map(joined_to_domain).collect()
    }

    async fn count(&self, hotel_id: &str, status: Option<RequestStatus>) -> DomainResult<u64> {
        let mut select =
            guest_request::Entity::find().filter(guest_request::Column::HotelId.eq(hotel_id));
        if let Some(status) = status {
            select = select.filter(guest_request::Column::Status.eq(status.as_str()));
        }
        select.count(&self.db).await.map_err(db_err)
    }
}
