//! # TourFlow API サーバー
//!
//! ユーザー登録・ログインと、ガイド付きツアーの CRUD を提供する HTTP API。
//!
//! ## モジュール構成
//!
//! - [`app_builder`] - ルーター構築とミドルウェア
//! - [`config`] - 環境変数からの設定読み込み
//! - [`error`] - API エラーと HTTP レスポンスへの変換
//! - [`handler`] - HTTP ハンドラ
//! - [`usecase`] - アプリケーションロジック

pub mod app_builder;
pub mod config;
pub mod error;
pub mod handler;
pub mod usecase;
