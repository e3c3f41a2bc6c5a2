//! Entity model to domain conversions shared by the repositories

use crate::domain::{Category, Comment, CommentAuthor, DomainError, Restaurant, UserProfile};
use crate::infrastructure::database::entities::{category, comment, restaurant, user};
use crate::shared::errors::InfraError;

pub(super) fn db_err(e: sea_orm::DbErr) -> DomainError {
    InfraError::from(e).into()
}

pub(super) fn category_to_domain(model: category::Model) -> Category {
    Category {
        id: model.id,
        name: model.name,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

pub(super) fn restaurant_to_domain(model: restaurant::Model) -> Restaurant {
    Restaurant {
        id: model.id,
        name: model.name,
        tel: model.tel,
        address: model.address,
        opening_hours: model.opening_hours,
        description: model.description,
        image: model.image,
        category_id: model.category_id,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

pub(super) fn user_to_domain(model: user::Model) -> UserProfile {
    UserProfile {
        id: model.id,
        name: model.name,
        email: model.email,
        created_at: model.created_at,
    }
}

pub(super) fn author_to_domain(model: user::Model) -> CommentAuthor {
    CommentAuthor {
        id: model.id,
        name: model.name,
    }
}

pub(super) fn comment_to_domain(model: comment::Model) -> Comment {
    Comment {
        id: model.id,
        text: model.text,
        user_id: model.user_id,
        restaurant_id: model.restaurant_id,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}
