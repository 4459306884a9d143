use sea_query::Iden;

#[derive(Iden, Clone)]
pub enum Draft {
    Table,
    StorageKey,
    Record,
    SavedAt,
}
