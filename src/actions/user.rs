use axum::http::Method;
use serde_json::json;

use super::{ActionContext, finish, to_body};
use crate::{
    backend::BackendRequest,
    error::ActionError,
    models::{
        ActionResult, LoginFormData, LoginPayload, User, UserFormData, UserFormPatch,
        UserListParams, UserPage, UserStatus,
    },
};

/// Cache tag covering every user listing.
pub const USERS_TAG: &str = "users";
const USERS_PATH: &str = "/users";

// --- Session ---

/// login
///
/// Exchanges credentials for a user and session token. The caller is
/// responsible for writing the token to the session cookie.
pub async fn login(ctx: &ActionContext, form: LoginFormData) -> ActionResult<LoginPayload> {
    let outcome: Result<Option<LoginPayload>, ActionError> = async {
        let body = json!({ "email": form.email, "password": form.password });
        let payload: LoginPayload = ctx
            .fetch(BackendRequest::new(Method::POST, "/user/login").with_body(body))
            .await?
            .ok_or_else(|| ActionError::Decode("登录响应缺少令牌".to_string()))?;
        ctx.revalidate(None, &["/"]);
        Ok(Some(payload))
    }
    .await;
    finish("login", outcome, "登录失败")
}

/// logout
///
/// Nothing to tell the backend; the caller clears the cookie.
pub async fn logout(ctx: &ActionContext) -> ActionResult<()> {
    ctx.revalidate(None, &["/"]);
    finish("logout", Ok(None), "登出失败")
}

pub async fn get_current_user(ctx: &ActionContext) -> ActionResult<User> {
    let outcome = ctx.fetch(BackendRequest::get("/user/current")).await;
    finish("get_current_user", outcome, "获取用户信息失败")
}

// --- User Management ---

pub async fn get_users(ctx: &ActionContext, params: UserListParams) -> ActionResult<UserPage> {
    let request = BackendRequest::get(USERS_PATH).with_query(params.to_query());
    let outcome = ctx.fetch(request).await;
    finish("get_users", outcome, "获取用户列表失败")
}

pub async fn create_user(ctx: &ActionContext, form: UserFormData) -> ActionResult<User> {
    let outcome: Result<Option<User>, ActionError> = async {
        let request = BackendRequest::new(Method::POST, USERS_PATH).with_body(to_body(&form)?);
        let user = ctx.fetch(request).await?;
        ctx.revalidate(Some(USERS_TAG), &[USERS_PATH]);
        Ok(user)
    }
    .await;
    finish("create_user", outcome, "创建用户失败")
}

/// update_user
///
/// Also revalidates the user's own detail page.
pub async fn update_user(ctx: &ActionContext, id: &str, patch: UserFormPatch) -> ActionResult<User> {
    let detail_path = format!("{USERS_PATH}/{id}");
    let outcome: Result<Option<User>, ActionError> = async {
        let request = BackendRequest::new(Method::PUT, detail_path.as_str()).with_body(to_body(&patch)?);
        let user = ctx.fetch(request).await?;
        ctx.revalidate(Some(USERS_TAG), &[USERS_PATH, detail_path.as_str()]);
        Ok(user)
    }
    .await;
    finish("update_user", outcome, "更新用户失败")
}

pub async fn delete_user(ctx: &ActionContext, id: &str) -> ActionResult<()> {
    let outcome: Result<Option<()>, ActionError> = async {
        ctx.execute(BackendRequest::delete(format!("{USERS_PATH}/{id}")))
            .await?;
        ctx.revalidate(Some(USERS_TAG), &[USERS_PATH]);
        Ok(None)
    }
    .await;
    finish("delete_user", outcome, "删除用户失败")
}

pub async fn batch_delete_users(ctx: &ActionContext, ids: Vec<String>) -> ActionResult<()> {
    let outcome: Result<Option<()>, ActionError> = async {
        let request = BackendRequest::new(Method::POST, "/users/batch-delete")
            .with_body(json!({ "ids": ids }));
        ctx.execute(request).await?;
        ctx.revalidate(Some(USERS_TAG), &[USERS_PATH]);
        Ok(None)
    }
    .await;
    finish("batch_delete_users", outcome, "批量删除失败")
}

pub async fn update_user_status(
    ctx: &ActionContext,
    id: &str,
    status: UserStatus,
) -> ActionResult<User> {
    let outcome: Result<Option<User>, ActionError> = async {
        let request = BackendRequest::new(Method::PATCH, format!("{USERS_PATH}/{id}/status"))
            .with_body(json!({ "status": status }));
        let user = ctx.fetch(request).await?;
        ctx.revalidate(Some(USERS_TAG), &[USERS_PATH]);
        Ok(user)
    }
    .await;
    finish("update_user_status", outcome, "更新状态失败")
}
