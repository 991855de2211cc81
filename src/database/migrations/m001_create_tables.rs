use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Taxonomy: theme -> niche -> sub-niche, children removed with
        // their parent.
        manager
            .create_table(
                Table::create()
                    .table(Themes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Themes::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Themes::Name).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Niches::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Niches::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Niches::ThemeId).string().not_null())
                    .col(ColumnDef::new(Niches::Name).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-niches-theme_id")
                            .from(Niches::Table, Niches::ThemeId)
                            .to(Themes::Table, Themes::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SubNiches::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SubNiches::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SubNiches::NicheId).string().not_null())
                    .col(ColumnDef::new(SubNiches::Name).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-sub_niches-niche_id")
                            .from(SubNiches::Table, SubNiches::NicheId)
                            .to(Niches::Table, Niches::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Designs keep their row when a linked taxonomy level disappears.
        manager
            .create_table(
                Table::create()
                    .table(Designs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Designs::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Designs::Title).string().not_null())
                    .col(ColumnDef::new(Designs::Slogan).text())
                    .col(ColumnDef::new(Designs::Description).text())
                    .col(ColumnDef::new(Designs::ThemeId).string())
                    .col(ColumnDef::new(Designs::NicheId).string())
                    .col(ColumnDef::new(Designs::SubNicheId).string())
                    .col(
                        ColumnDef::new(Designs::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-designs-theme_id")
                            .from(Designs::Table, Designs::ThemeId)
                            .to(Themes::Table, Themes::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-designs-niche_id")
                            .from(Designs::Table, Designs::NicheId)
                            .to(Niches::Table, Niches::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-designs-sub_niche_id")
                            .from(Designs::Table, Designs::SubNicheId)
                            .to(SubNiches::Table, SubNiches::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(DesignMockups::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DesignMockups::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(DesignMockups::DesignId).string().not_null())
                    .col(
                        ColumnDef::new(DesignMockups::StorageUrl)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DesignMockups::IsPrimary)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-design_mockups-design_id")
                            .from(DesignMockups::Table, DesignMockups::DesignId)
                            .to(Designs::Table, Designs::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SeoAnalyses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SeoAnalyses::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SeoAnalyses::DesignId).string().not_null())
                    .col(ColumnDef::new(SeoAnalyses::GeneratedTitle).text())
                    .col(ColumnDef::new(SeoAnalyses::GeneratedDescription).text())
                    .col(ColumnDef::new(SeoAnalyses::TotalScore).double())
                    .col(
                        ColumnDef::new(SeoAnalyses::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SeoAnalyses::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-seo_analyses-design_id")
                            .from(SeoAnalyses::Table, SeoAnalyses::DesignId)
                            .to(Designs::Table, Designs::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SeoKeywords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SeoKeywords::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SeoKeywords::AnalysisId).string().not_null())
                    .col(ColumnDef::new(SeoKeywords::Keyword).string().not_null())
                    .col(ColumnDef::new(SeoKeywords::AvgVolume).big_integer())
                    .col(ColumnDef::new(SeoKeywords::Competition).double())
                    .col(ColumnDef::new(SeoKeywords::OpportunityScore).double())
                    .col(ColumnDef::new(SeoKeywords::VolumesHistory).text())
                    .col(ColumnDef::new(SeoKeywords::IsTrending).boolean())
                    .col(ColumnDef::new(SeoKeywords::IsEvergreen).boolean())
                    .col(ColumnDef::new(SeoKeywords::IsPromising).boolean())
                    .col(
                        ColumnDef::new(SeoKeywords::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-seo_keywords-analysis_id")
                            .from(SeoKeywords::Table, SeoKeywords::AnalysisId)
                            .to(SeoAnalyses::Table, SeoAnalyses::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One analysis per design; upsert conflict target.
        manager
            .create_index(
                Index::create()
                    .name("idx-seo_analyses-design_id")
                    .table(SeoAnalyses::Table)
                    .col(SeoAnalyses::DesignId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-niches-theme_id")
                    .table(Niches::Table)
                    .col(Niches::ThemeId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-sub_niches-niche_id")
                    .table(SubNiches::Table)
                    .col(SubNiches::NicheId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-design_mockups-design_id")
                    .table(DesignMockups::Table)
                    .col(DesignMockups::DesignId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-seo_keywords-analysis_id")
                    .table(SeoKeywords::Table)
                    .col(SeoKeywords::AnalysisId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SeoKeywords::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SeoAnalyses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(DesignMockups::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Designs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SubNiches::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Niches::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Themes::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Themes {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum Niches {
    Table,
    Id,
    ThemeId,
    Name,
}

#[derive(DeriveIden)]
enum SubNiches {
    Table,
    Id,
    NicheId,
    Name,
}

#[derive(DeriveIden)]
enum Designs {
    Table,
    Id,
    Title,
    Slogan,
    Description,
    ThemeId,
    NicheId,
    SubNicheId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum DesignMockups {
    Table,
    Id,
    DesignId,
    StorageUrl,
    IsPrimary,
}

#[derive(DeriveIden)]
enum SeoAnalyses {
    Table,
    Id,
    DesignId,
    GeneratedTitle,
    GeneratedDescription,
    TotalScore,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum SeoKeywords {
    Table,
    Id,
    AnalysisId,
    Keyword,
    AvgVolume,
    Competition,
    OpportunityScore,
    VolumesHistory,
    IsTrending,
    IsEvergreen,
    IsPromising,
    CreatedAt,
}
