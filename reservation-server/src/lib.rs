//! Reservation Server - 餐厅桌台预订系统
//!
//! # 架构概述
//!
//! - **数据库** (`db`): SQLite 连接池 + 仓储层 (zone / dining_table / user)
//! - **预订引擎** (`reservations`): 可用性查询 + 原子预订事务 + 生命周期
//! - **认证** (`auth`): JWT + Argon2 认证体系
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! reservation-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # JWT 认证
//! ├── api/           # HTTP 路由和处理器
//! ├── reservations/  # 预订并发引擎
//! ├── db/            # 数据库层
//! └── utils/         # 工具函数
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod reservations;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use reservations::{BookingOutcome, ReservationManager};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};
