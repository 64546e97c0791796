//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`auth`] - 认证相关接口
//! - [`zones`] - 区域管理接口
//! - [`tables`] - 桌台管理接口
//! - [`reservations`] - 预订接口 (含可用性查询)

pub mod auth;
pub mod health;

// Data models API
pub mod reservations;
pub mod tables;
pub mod zones;

// Re-export common types for handlers
pub use crate::utils::AppResult;
