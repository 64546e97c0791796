use std::sync::Arc;

use chrono::NaiveDate;
use shared::models::UserRole;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::{DbService, repository::user};
use crate::reservations::ReservationManager;
use crate::utils::AppError;

/// 服务器状态 - 持有所有服务的单例引用
///
/// 使用 Arc / pool clone 实现浅拷贝，所有权成本极低。
///
/// | 字段 | 说明 |
/// |------|------|
/// | config | 配置项 (不可变) |
/// | db | SQLite 连接池服务 |
/// | jwt_service | JWT 认证服务 |
/// | reservations | 预订引擎 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 数据库服务
    pub db: DbService,
    /// JWT 认证服务 (Arc 共享所有权)
    pub jwt_service: Arc<JwtService>,
    /// 预订引擎
    pub reservations: ReservationManager,
}

impl ServerState {
    /// 初始化服务器状态: 打开数据库、应用迁移、装配服务
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        let db = DbService::new(&config.database_path).await?;
        let jwt_service = Arc::new(JwtService::new(config.jwt.clone()));
        let reservations = ReservationManager::new(db.pool.clone());

        let state = Self {
            config: config.clone(),
            db,
            jwt_service,
            reservations,
        };
        state.seed_admin().await?;
        Ok(state)
    }

    /// 今天的日期 (业务时区)
    pub fn business_today(&self) -> NaiveDate {
        crate::utils::time::today(self.config.timezone)
    }

    /// Seed the administrator account from ADMIN_EMAIL / ADMIN_PASSWORD
    ///
    /// No-op when the variables are unset or the account already exists.
    async fn seed_admin(&self) -> Result<(), AppError> {
        let (Ok(email), Ok(password)) =
            (std::env::var("ADMIN_EMAIL"), std::env::var("ADMIN_PASSWORD"))
        else {
            return Ok(());
        };

        if user::find_by_email(&self.db.pool, &email).await?.is_some() {
            return Ok(());
        }

        let hash = crate::auth::hash_password(&password)
            .map_err(|e| AppError::internal(format!("Failed to hash admin password: {e}")))?;
        user::create(
            &self.db.pool,
            "Administrator",
            &email,
            &hash,
            None,
            UserRole::Admin,
        )
        .await?;
        tracing::info!(email = %email, "administrator account seeded");
        Ok(())
    }
}
