use foodgram_domain::pagination::{Page, PageRequest};

use crate::domain::image::parse_data_uri;
use crate::domain::password::{hash_password, verify_password};
use crate::domain::repository::{ImageStore, SubscriptionRepository, UserRepository};
use crate::domain::types::{MediaFolder, NewUser, User, UserView};
use crate::domain::validation::{
    password_problem, validate_email, validate_person_name, validate_username,
};
use crate::error::FoodgramError;
use crate::usecase::{discard_image, require_caller};

// ── ListUsers ────────────────────────────────────────────────────────────────

pub struct ListUsersUseCase<U: UserRepository, S: SubscriptionRepository> {
    pub users: U,
    pub subscriptions: S,
}

impl<U: UserRepository, S: SubscriptionRepository> ListUsersUseCase<U, S> {
    pub async fn execute(
        &self,
        viewer: Option<i32>,
        page: PageRequest,
    ) -> Result<Page<UserView>, FoodgramError> {
        let users = self.users.list(page).await?;
        let followed = match viewer {
            Some(viewer) => {
                let ids: Vec<i32> = users.items.iter().map(|u| u.id).collect();
                self.subscriptions.subscribed_among(viewer, &ids).await?
            }
            None => Vec::new(),
        };
        Ok(users.map(|user| UserView {
            is_subscribed: followed.contains(&user.id),
            user,
        }))
    }
}

// ── GetUser ──────────────────────────────────────────────────────────────────

pub struct GetUserUseCase<U: UserRepository, S: SubscriptionRepository> {
    pub users: U,
    pub subscriptions: S,
}

impl<U: UserRepository, S: SubscriptionRepository> GetUserUseCase<U, S> {
    pub async fn execute(&self, viewer: Option<i32>, id: i32) -> Result<UserView, FoodgramError> {
        let user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or(FoodgramError::UserNotFound)?;
        let is_subscribed = match viewer {
            Some(viewer) if viewer != id => self.subscriptions.is_subscribed(viewer, id).await?,
            _ => false,
        };
        Ok(UserView {
            user,
            is_subscribed,
        })
    }
}

// ── CreateUser ───────────────────────────────────────────────────────────────

pub struct CreateUserInput {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

pub struct CreateUserUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> CreateUserUseCase<U> {
    pub async fn execute(&self, input: CreateUserInput) -> Result<User, FoodgramError> {
        let email = input.email.trim().to_owned();
        if !validate_email(&email) {
            return Err(FoodgramError::invalid("email", "enter a valid email address"));
        }
        if !validate_username(&input.username) {
            return Err(FoodgramError::invalid(
                "username",
                "username may contain only letters, digits and @/./+/-/_ and must not be \"me\"",
            ));
        }
        if !validate_person_name(&input.first_name) {
            return Err(FoodgramError::invalid("first_name", "enter a first name"));
        }
        if !validate_person_name(&input.last_name) {
            return Err(FoodgramError::invalid("last_name", "enter a last name"));
        }
        if self.users.email_taken(&email).await? {
            return Err(FoodgramError::invalid(
                "email",
                "a user with this email already exists",
            ));
        }
        if self.users.username_taken(&input.username).await? {
            return Err(FoodgramError::invalid(
                "username",
                "a user with this username already exists",
            ));
        }
        if let Some(problem) = password_problem(&input.password, &input.username, &email) {
            return Err(FoodgramError::invalid("password", problem));
        }

        let password_hash = hash_password(&input.password)?;
        let user = self
            .users
            .create(&NewUser {
                email,
                username: input.username,
                first_name: input.first_name.trim().to_owned(),
                last_name: input.last_name.trim().to_owned(),
                password_hash,
            })
            .await?;
        tracing::info!(user_id = user.id, "user registered");
        Ok(user)
    }
}

// ── SetPassword ──────────────────────────────────────────────────────────────

pub struct SetPasswordUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> SetPasswordUseCase<U> {
    pub async fn execute(
        &self,
        user_id: i32,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), FoodgramError> {
        let user = require_caller(&self.users, user_id).await?;
        if !verify_password(current_password, &user.password_hash)? {
            return Err(FoodgramError::WrongPassword);
        }
        if let Some(problem) = password_problem(new_password, &user.username, &user.email) {
            return Err(FoodgramError::invalid("new_password", problem));
        }
        let hash = hash_password(new_password)?;
        self.users.update_password(user_id, &hash).await
    }
}

// ── SetAvatar / DeleteAvatar ─────────────────────────────────────────────────

pub struct SetAvatarUseCase<U: UserRepository, I: ImageStore> {
    pub users: U,
    pub images: I,
}

impl<U: UserRepository, I: ImageStore> SetAvatarUseCase<U, I> {
    /// Returns the media-relative path of the new avatar.
    pub async fn execute(&self, user_id: i32, avatar: &str) -> Result<String, FoodgramError> {
        let upload = parse_data_uri(avatar)
            .ok_or_else(|| FoodgramError::invalid("avatar", "upload a valid base64 image"))?;
        let user = require_caller(&self.users, user_id).await?;
        let path = self.images.save(MediaFolder::Users, &upload).await?;
        if let Err(e) = self.users.update_avatar(user_id, Some(&path)).await {
            discard_image(&self.images, &path).await;
            return Err(e);
        }
        if let Some(old) = user.avatar {
            discard_image(&self.images, &old).await;
        }
        Ok(path)
    }
}

pub struct DeleteAvatarUseCase<U: UserRepository, I: ImageStore> {
    pub users: U,
    pub images: I,
}

impl<U: UserRepository, I: ImageStore> DeleteAvatarUseCase<U, I> {
    pub async fn execute(&self, user_id: i32) -> Result<(), FoodgramError> {
        let user = require_caller(&self.users, user_id).await?;
        if let Some(old) = user.avatar {
            self.users.update_avatar(user_id, None).await?;
            discard_image(&self.images, &old).await;
        }
        Ok(())
    }
}
