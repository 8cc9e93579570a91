use sea_orm_migration::sea_query::extension::postgres::Type;
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(TeamStatus::Enum)
                    .values([
                        TeamStatus::Current,
                        TeamStatus::Past,
                        TeamStatus::Future,
                        TeamStatus::Collaborator,
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Posts::Table)
                    .if_not_exists()
                    .col(uuid(Posts::Id).primary_key())
                    .col(string(Posts::Title))
                    .col(string_uniq(Posts::Url))
                    .col(string(Posts::Image))
                    .col(string_null(Posts::ImagePublicId))
                    .col(text(Posts::Content))
                    .col(json_binary(Posts::Authors))
                    .col(json_binary(Posts::Paragraphs))
                    .col(created(Posts::CreatedAt))
                    .col(created(Posts::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Research::Table)
                    .if_not_exists()
                    .col(uuid(Research::Id).primary_key())
                    .col(string(Research::Title))
                    .col(string_uniq(Research::Url))
                    .col(string(Research::Image))
                    .col(string_null(Research::ImagePublicId))
                    .col(string(Research::Category))
                    .col(text(Research::Content))
                    .col(string(Research::Author))
                    .col(json_binary(Research::Paragraphs))
                    .col(created(Research::CreatedAt))
                    .col(created(Research::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Teams::Table)
                    .if_not_exists()
                    .col(uuid(Teams::Id).primary_key())
                    .col(string(Teams::Name))
                    .col(string(Teams::Occupation))
                    .col(string(Teams::Title))
                    .col(string(Teams::Image))
                    .col(text(Teams::Comment))
                    .col(string(Teams::Affiliation))
                    .col(
                        enumeration(
                            Teams::Status,
                            TeamStatus::Enum,
                            [
                                TeamStatus::Current,
                                TeamStatus::Past,
                                TeamStatus::Future,
                                TeamStatus::Collaborator,
                            ],
                        )
                        .default("CURRENT"),
                    )
                    .col(string_null(Teams::Twitter))
                    .col(string_null(Teams::Facebook))
                    .col(string_null(Teams::Linkedin))
                    .col(string_null(Teams::Instagram))
                    .col(created(Teams::CreatedAt))
                    .col(created(Teams::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(uuid(Users::Id).primary_key())
                    .col(string(Users::Fullname))
                    .col(string_uniq(Users::Email))
                    .col(string(Users::PasswordHash))
                    .col(created(Users::CreatedAt))
                    .col(created(Users::UpdatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in [
            Users::Table.into_iden(),
            Teams::Table.into_iden(),
            Research::Table.into_iden(),
            Posts::Table.into_iden(),
        ] {
            manager
                .drop_table(Table::drop().table(table).if_exists().to_owned())
                .await?;
        }
        manager
            .drop_type(Type::drop().name(TeamStatus::Enum).if_exists().to_owned())
            .await
    }
}

fn created<T: IntoIden>(col: T) -> ColumnDef {
    timestamp_with_time_zone(col)
        .default(Expr::current_timestamp())
        .to_owned()
}

#[derive(DeriveIden)]
enum Posts {
    Table,
    Id,
    Title,
    Url,
    Image,
    ImagePublicId,
    Content,
    Authors,
    Paragraphs,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Research {
    Table,
    Id,
    Title,
    Url,
    Image,
    ImagePublicId,
    Category,
    Content,
    Author,
    Paragraphs,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Teams {
    Table,
    Id,
    Name,
    Occupation,
    Title,
    Image,
    Comment,
    Affiliation,
    Status,
    Twitter,
    Facebook,
    Linkedin,
    Instagram,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Fullname,
    Email,
    PasswordHash,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum TeamStatus {
    #[sea_orm(iden = "team_status")]
    Enum,
    #[sea_orm(iden = "CURRENT")]
    Current,
    #[sea_orm(iden = "PAST")]
    Past,
    #[sea_orm(iden = "FUTURE")]
    Future,
    #[sea_orm(iden = "COLLABORATOR")]
    Collaborator,
}
