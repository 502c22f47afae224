use crate::context::AppContext;
use anyhow::Result;
use application::services::FavoritesStore;
use clap::{Args, Subcommand};
use console::style;
use domain::AnalyticsAction;

#[derive(Debug, Args)]
pub struct FavoriteCommand {
    #[command(subcommand)]
    pub action: FavoriteAction,
}

#[derive(Debug, Subcommand)]
pub enum FavoriteAction {
    /// Добавить инструмент в избранное
    Add { tool: String },

    /// Убрать инструмент из избранного
    #[command(visible_alias = "rm")]
    Remove { tool: String },

    /// Переключить состояние
    Toggle { tool: String },

    /// Показать избранное
    #[command(visible_alias = "ls")]
    List,

    /// Очистить избранное
    Clear,
}

impl FavoriteCommand {
    pub fn execute(&self, ctx: &AppContext) -> Result<()> {
        let favorites = FavoritesStore::load(ctx.store());

        match &self.action {
            FavoriteAction::Add { tool } => {
                let subject = AppContext::subject(tool)?;
                if favorites.add(subject.clone()) {
                    ctx.analytics()
                        .track_event(&subject, AnalyticsAction::Favorite, None);
                    println!("{} {} added to favorites", style("★").yellow(), tool);
                } else {
                    println!("{tool} is already a favorite");
                }
            }
            FavoriteAction::Remove { tool } => {
                let subject = AppContext::subject(tool)?;
                if favorites.remove(&subject) {
                    ctx.analytics()
                        .track_event(&subject, AnalyticsAction::Unfavorite, None);
                    println!("{} {} removed from favorites", style("☆").dim(), tool);
                } else {
                    println!("{tool} is not a favorite");
                }
            }
            FavoriteAction::Toggle { tool } => {
                let subject = AppContext::subject(tool)?;
                let now_favorite = favorites.toggle(subject.clone());
                let action = if now_favorite {
                    AnalyticsAction::Favorite
                } else {
                    AnalyticsAction::Unfavorite
                };
                ctx.analytics().track_event(&subject, action, None);
                println!(
                    "{tool}: {}",
                    if now_favorite { "favorite" } else { "not a favorite" }
                );
            }
            FavoriteAction::List => {
                let list = favorites.list();
                if list.is_empty() {
                    println!("{}", style("No favorites yet").dim());
                }
                for subject in list {
                    println!("{subject}");
                }
            }
            FavoriteAction::Clear => {
                favorites.clear();
                println!("Favorites cleared");
            }
        }

        Ok(())
    }
}
