/*
 * Responsibility
 * - handler から使うドメイン横断のロジック
 */
pub mod sanitize;
