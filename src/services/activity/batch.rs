//! Transactional application of scheduling plans. Every multi-step write
//! lands in one transaction: a failed swap, split or travel proposal leaves
//! the schedule exactly as it was.

use anyhow::{anyhow, Context, Result};

use super::ActivityService;
use crate::models::activity::Activity;
use crate::services::scheduling::drop::{DropPlan, Retiming};
use crate::services::scheduling::split::SplitPlan;
use crate::services::travel::TravelUpdate;

impl<'a> ActivityService<'a> {
    /// Apply a drop plan. A swap writes both retimings or neither.
    pub fn apply_drop(&self, plan: &DropPlan) -> Result<()> {
        let tx = self
            .conn
            .unchecked_transaction()
            .context("Failed to open drop transaction")?;

        {
            let service = ActivityService::new(&tx);
            match plan {
                DropPlan::Move(retiming) => service.apply_retiming(retiming)?,
                DropPlan::Swap { dragged, occupant } => {
                    service.apply_retiming(dragged)?;
                    service.apply_retiming(occupant)?;
                }
            }
        }

        tx.commit().context("Failed to commit drop")?;
        Ok(())
    }

    /// Apply a split plan: create both replacements, delete the original.
    /// Returns the replacements with their assigned ids.
    pub fn apply_split(&self, plan: &SplitPlan) -> Result<[Activity; 2]> {
        let original_id = plan
            .original
            .row_id()
            .ok_or_else(|| anyhow!("Cannot split an unsaved activity"))?;

        let tx = self
            .conn
            .unchecked_transaction()
            .context("Failed to open split transaction")?;

        let created = {
            let service = ActivityService::new(&tx);
            let [first, second] = &plan.replacements;
            let first = service.create(first.clone())?;
            let second = service.create(second.clone())?;
            service.delete(original_id)?;
            [first, second]
        };

        tx.commit().context("Failed to commit split")?;
        Ok(created)
    }

    /// Apply an accepted travel proposal in one transaction. Draft entries
    /// are created, stale fillers deleted, the rest retimed.
    pub fn apply_travel_updates(&self, updates: &[TravelUpdate]) -> Result<()> {
        let tx = self
            .conn
            .unchecked_transaction()
            .context("Failed to open travel transaction")?;

        {
            let service = ActivityService::new(&tx);
            for update in updates {
                if update.should_delete {
                    if let Some(id) = update.activity_id.row_id() {
                        service.delete(id)?;
                    }
                } else if update.should_create {
                    let draft = update
                        .draft
                        .as_ref()
                        .ok_or_else(|| anyhow!("Travel creation entry is missing its draft"))?;
                    service.create(draft.clone())?;
                } else {
                    service.apply_retiming(&Retiming {
                        id: update.activity_id,
                        start_date: update.new_date,
                        start_time: update.new_start,
                        end_date: update.new_end_date,
                        end_time: update.new_end,
                    })?;
                }
            }
        }

        tx.commit().context("Failed to commit travel updates")?;
        Ok(())
    }

    fn apply_retiming(&self, retiming: &Retiming) -> Result<()> {
        let id = retiming
            .id
            .row_id()
            .ok_or_else(|| anyhow!("Cannot retime an unsaved activity"))?;
        let mut activity = self
            .get(id)?
            .ok_or_else(|| anyhow!("Activity with id {} not found", id))?;

        activity.start_date = retiming.start_date;
        activity.start_time = retiming.start_time;
        activity.end_date = retiming.end_date;
        activity.end_time = retiming.end_time;
        activity.normalize();
        self.update(&activity)
    }
}
