// Backend de agendamentos do estúdio: os módulos ficam na lib para que
// os testes de integração em tests/ consigam usá-los.

pub mod common;
pub mod config;
pub mod db;
pub mod docs;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
