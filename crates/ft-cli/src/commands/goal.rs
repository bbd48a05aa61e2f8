//! Goal command for showing or setting the fasting goal.

use std::io::Write;

use anyhow::{Context, Result};

use ft_db::Database;

use crate::GoalAction;

pub fn run<W: Write>(writer: &mut W, db: &mut Database, action: Option<&GoalAction>) -> Result<()> {
    match action {
        None => {
            let hours = db.fasting_goal_hours()?;
            writeln!(writer, "Fasting goal: {hours}h")?;
        }
        Some(GoalAction::Set { hours }) => {
            db.set_fasting_goal_hours(*hours)
                .context("failed to set fasting goal")?;
            writeln!(writer, "Fasting goal set to {hours}h")?;
        }
    }
    Ok(())
}
