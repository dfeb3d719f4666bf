use crate::core::report::AdmissionReport;
use crate::core::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::RunMonitor;

/// Drives a [`Pipeline`] through its three stages with stage logging and
/// optional resource monitoring.
pub struct AdmissionRunner<P: Pipeline> {
    pipeline: P,
    monitor: RunMonitor,
}

impl<P: Pipeline> AdmissionRunner<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: RunMonitor::new(monitor_enabled),
        }
    }

    pub fn run(&self) -> Result<AdmissionReport> {
        tracing::info!("Starting admission run");

        let system = self.pipeline.register()?;
        tracing::info!(
            "Registered {} participants, catalog of {} activities",
            system.participants().len(),
            system.activities().len()
        );
        self.monitor.log_stats("register");

        let system = self.pipeline.enroll(system)?;
        tracing::info!(
            "Enrollment sweep complete, {} capacity rejections",
            system.rejected_for_capacity().len()
        );
        self.monitor.log_stats("enroll");

        let report = self.pipeline.report(&system)?;
        tracing::info!("Report generated");
        self.monitor.log_stats("report");
        self.monitor.log_final_stats();

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::report;
    use crate::core::system::EnrollmentSystem;
    use crate::core::{engine, Pipeline};
    use crate::domain::model::{ActivityDef, ActivityKind, ParticipantDef, Profile};

    struct FixedPipeline;

    impl Pipeline for FixedPipeline {
        fn register(&self) -> Result<EnrollmentSystem> {
            let mut system = EnrollmentSystem::new();
            system.add_activity(ActivityDef {
                name: "Talk".to_string(),
                kind: ActivityKind::Talk,
                capacity: 5,
                minimum_age: 0,
            });
            system.register_participant(ParticipantDef {
                name: "V".to_string(),
                age: 30,
                profile: Profile::Visitor,
                wants_enrollment: true,
                guardian: None,
            });
            Ok(system)
        }

        fn enroll(&self, mut system: EnrollmentSystem) -> Result<EnrollmentSystem> {
            engine::process(&mut system);
            Ok(system)
        }

        fn report(&self, system: &EnrollmentSystem) -> Result<AdmissionReport> {
            Ok(report::summarize(system))
        }
    }

    #[test]
    fn runner_chains_all_three_stages() {
        let runner = AdmissionRunner::new(FixedPipeline);
        let report = runner.run().unwrap();
        assert_eq!(report.demand_by_activity[0].enrolled, 1);
        assert_eq!(report.counts_by_profile[&Profile::Visitor], 1);
    }
}
