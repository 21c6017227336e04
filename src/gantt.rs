//! Gantt renderer. Renders each process's run-history as a horizontal bar
//! chart. No charting-crate precedent in this codebase (the original
//! Python used matplotlib), so this uses `plotters`, the standard Rust
//! equivalent for PNG chart generation. Isolated behind one narrow
//! function so a missing/broken backend degrades to a non-fatal renderer
//! error instead of aborting the run.

use plotters::prelude::*;

use crate::error::RenderError;

pub struct ProcessOccupancy {
    pub pid: u32,
    pub name: String,
    pub priority: u32,
    pub color_index: usize,
    pub intervals: Vec<(u32, u32)>,
}

const PALETTE: [(u8, u8, u8); 8] = [
    (228, 26, 28),
    (55, 126, 184),
    (77, 175, 74),
    (152, 78, 163),
    (255, 127, 0),
    (255, 255, 51),
    (166, 86, 40),
    (247, 129, 191),
];

/// Writes `gantt_chart_<scheduler>.png` depicting each process's
/// run-history segments across `[0, final_clock)`. Never panics on a
/// drawing failure; returns `RenderError` instead so the caller can log
/// and continue.
pub fn render_gantt(
    scheduler_name: &str,
    final_clock: u32,
    processes: &[ProcessOccupancy],
) -> Result<std::path::PathBuf, RenderError> {
    render_gantt_into(scheduler_name, final_clock, processes, std::path::Path::new("."))
}

/// Same as `render_gantt` but writes into `dir` instead of the current
/// working directory, so tests don't need to mutate global process state.
pub fn render_gantt_into(
    scheduler_name: &str,
    final_clock: u32,
    processes: &[ProcessOccupancy],
    dir: &std::path::Path,
) -> Result<std::path::PathBuf, RenderError> {
    if processes.is_empty() {
        return Err(RenderError::NothingToRender);
    }

    let path = dir.join(format!("gantt_chart_{scheduler_name}.png"));
    let row_height = 40u32;
    let height = row_height * processes.len() as u32 + 80;
    let width = 1000u32.max(final_clock.max(1) * 12 + 200);

    {
        let root = BitMapBackend::new(&path, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(|e| RenderError::Backend(e.to_string()))?;

        let mut chart = ChartBuilder::on(&root)
            .caption(format!("Scheduler: {scheduler_name}"), ("sans-serif", 20))
            .margin(10)
            .x_label_area_size(30)
            .y_label_area_size(120)
            .build_cartesian_2d(0u32..final_clock.max(1), 0u32..processes.len() as u32)
            .map_err(|e| RenderError::Backend(e.to_string()))?;

        chart
            .configure_mesh()
            .y_labels(processes.len())
            .y_label_formatter(&|idx| {
                processes
                    .get(*idx as usize)
                    .map(|p| format!("{} (p{})", p.name, p.priority))
                    .unwrap_or_default()
            })
            .draw()
            .map_err(|e| RenderError::Backend(e.to_string()))?;

        for (row, proc) in processes.iter().enumerate() {
            let (r, g, b) = PALETTE[proc.color_index % PALETTE.len()];
            let color = RGBColor(r, g, b);
            for &(start, end) in &proc.intervals {
                let bar = Rectangle::new(
                    [(start, row as u32), (end, row as u32 + 1)],
                    color.filled(),
                );
                chart.draw_series(std::iter::once(bar)).map_err(|e| RenderError::Backend(e.to_string()))?;
            }
        }

        root.present().map_err(|e| RenderError::Backend(e.to_string()))?;
    }

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_process_list() {
        assert!(matches!(
            render_gantt("fcfs", 10, &[]),
            Err(RenderError::NothingToRender)
        ));
    }

    #[test]
    fn renders_png_for_a_single_process() {
        let dir = tempfile::tempdir().unwrap();
        let path = render_gantt_into(
            "fcfs",
            11,
            &[ProcessOccupancy {
                pid: 1,
                name: "hello".to_string(),
                priority: 1,
                color_index: 0,
                intervals: vec![(0, 11)],
            }],
            dir.path(),
        )
        .unwrap();
        assert!(path.exists());
    }
}
