//! Message handlers for the correspondence session
//!
//! Each handler mutates the workspace and returns a task (file dialogs are
//! the only async step; the chosen path comes back as a `…Chosen` message and
//! the actual I/O runs synchronously here).

use std::path::{Path, PathBuf};

use crate::domain::{Side, ensure_saveable, CorrespondenceError};
use crate::files::points;
use crate::picker::cloud::CloudSurface;
use crate::picker::image::ImagePlane;
use crate::render::style;
use crate::session::messages::{CloudMsg, EditMsg, FileMsg, ImageMsg, Msg, UiMsg};
use crate::session::state::{CloudPane, ImagePane, Workspace};

pub type HandlerResult = cosmic::Task<Msg>;

// ============================================================================
// File workflow
// ============================================================================

pub fn handle_file_msg(ws: &mut Workspace, msg: FileMsg) -> HandlerResult {
    match msg {
        FileMsg::OpenImage => choose_open(
            "Open image",
            ("images", &["png", "tif", "tiff", "jpg", "jpeg"]),
            |path| Msg::File(FileMsg::OpenImageChosen(path)),
        ),
        FileMsg::OpenImageChosen(None) => dialog_cancelled(),
        FileMsg::OpenImageChosen(Some(path)) => {
            match ImagePane::open(&path, ws.config.rgb_display) {
                Ok(pane) => {
                    ws.report_info(format!(
                        "opened image {} ({}x{})",
                        path.display(),
                        pane.source.width(),
                        pane.source.height()
                    ));
                    ws.image = Some(pane);
                }
                Err(err) => ws.report_error(format!("{err:#}")),
            }
            cosmic::Task::none()
        }

        FileMsg::OpenCloud => choose_open(
            "Open point cloud",
            ("point clouds", &["xyz", "txt", "pts", "ply"]),
            |path| Msg::File(FileMsg::OpenCloudChosen(path)),
        ),
        FileMsg::OpenCloudChosen(None) => dialog_cancelled(),
        FileMsg::OpenCloudChosen(Some(path)) => {
            match CloudPane::open(&path, ws.cloud_gate()) {
                Ok(pane) => {
                    ws.report_info(format!(
                        "opened point cloud {} ({} points)",
                        path.display(),
                        pane.cloud.len()
                    ));
                    ws.cloud = Some(pane);
                }
                Err(err) => ws.report_error(format!("{err:#}")),
            }
            cosmic::Task::none()
        }

        FileMsg::LoadPoints(side) => {
            if ws.picker_mut(side).is_none() {
                ws.report_error(CorrespondenceError::PrereqMissing(side).to_string());
                return cosmic::Task::none();
            }
            let title = match side {
                Side::Image => "Load image keypoints",
                Side::Cloud => "Load cloud keypoints",
            };
            choose_open(title, ("keypoint lists", &["txt"]), move |path| {
                Msg::File(FileMsg::LoadPointsChosen(side, path))
            })
        }
        FileMsg::LoadPointsChosen(_, None) => dialog_cancelled(),
        FileMsg::LoadPointsChosen(side, Some(path)) => {
            load_points(ws, side, &path);
            cosmic::Task::none()
        }

        FileMsg::SavePoints(side) => {
            if ws.picker_mut(side).is_none() {
                ws.report_error(CorrespondenceError::PrereqMissing(side).to_string());
                return cosmic::Task::none();
            }
            let (image, cloud) = ws.counts();
            if let Err(err) = ensure_saveable(image, cloud) {
                ws.report_error(err.to_string());
                return cosmic::Task::none();
            }
            let (title, file_name) = match side {
                Side::Image => ("Save image keypoints", "image_points.txt"),
                Side::Cloud => ("Save cloud keypoints", "cloud_points.txt"),
            };
            choose_save(title, file_name, move |path| {
                Msg::File(FileMsg::SavePointsChosen(side, path))
            })
        }
        FileMsg::SavePointsChosen(_, None) => dialog_cancelled(),
        FileMsg::SavePointsChosen(side, Some(path)) => {
            save_points(ws, side, &path);
            cosmic::Task::none()
        }
    }
}

fn load_points(ws: &mut Workspace, side: Side, path: &Path) {
    let parsed = match side {
        Side::Image => points::read_image_points(path),
        Side::Cloud => points::read_cloud_points(path),
    };
    let coords = match parsed {
        Ok(coords) => coords,
        Err(err) => {
            ws.report_error(err.to_string());
            return;
        }
    };
    let count = coords.len();
    let outcome = match ws.picker_mut(side) {
        Some(picker) => {
            picker.replace_all(coords);
            Ok(())
        }
        None => Err(CorrespondenceError::PrereqMissing(side)),
    };
    match outcome {
        Ok(()) => ws.report_info(format!(
            "loaded {count} {} keypoints from {}",
            side.label(),
            path.display()
        )),
        Err(err) => ws.report_error(err.to_string()),
    }
}

fn save_points(ws: &mut Workspace, side: Side, path: &Path) {
    let (image, cloud) = ws.counts();
    if let Err(err) = ensure_saveable(image, cloud) {
        ws.report_error(err.to_string());
        return;
    }
    let written = match side {
        Side::Image => ws
            .image
            .as_ref()
            .map(|pane| points::write_image_points(path, pane.picker.keypoints().positions())),
        Side::Cloud => ws
            .cloud
            .as_ref()
            .map(|pane| points::write_cloud_points(path, pane.picker.keypoints().positions())),
    };
    let Some(written) = written else {
        ws.report_error(CorrespondenceError::PrereqMissing(side).to_string());
        return;
    };
    match written {
        Ok(()) => {
            let count = match side {
                Side::Image => image,
                Side::Cloud => cloud,
            };
            ws.report_info(format!(
                "saved {count} {} keypoints to {}",
                side.label(),
                path.display()
            ));
        }
        Err(err) => ws.report_error(err.to_string()),
    }
}

// ============================================================================
// Viewport interaction
// ============================================================================

pub fn handle_image_msg(ws: &mut Workspace, msg: ImageMsg) -> HandlerResult {
    let Some(pane) = ws.image.as_mut() else {
        return cosmic::Task::none();
    };
    match msg {
        ImageMsg::Pick { pos, pane: size } => {
            let surface = ImagePlane {
                transform: pane.view.transform(pane.image_size(), size),
            };
            let label = pane.picker.primary_click(&surface, pos, false);
            let last = pane.picker.keypoints().iter().last().copied();
            if let (Some(label), Some(kp)) = (label, last) {
                ws.report_info(format!(
                    "image keypoint {label} at ({:.2}, {:.2})",
                    kp.world.x, kp.world.y
                ));
            }
        }
        ImageMsg::Zoom {
            at,
            steps,
            pane: size,
        } => {
            let factor = style::image::ZOOM_STEP.powf(steps as f64);
            let image_size = pane.image_size();
            pane.view.zoom_about(at, factor, image_size, size);
        }
        ImageMsg::Pan { delta } => pane.view.pan_by(delta),
    }
    cosmic::Task::none()
}

pub fn handle_cloud_msg(ws: &mut Workspace, msg: CloudMsg) -> HandlerResult {
    let Some(pane) = ws.cloud.as_mut() else {
        return cosmic::Task::none();
    };
    match msg {
        CloudMsg::Pick {
            pos,
            pane: size,
            ctrl,
        } => {
            let surface = CloudSurface {
                cloud: &pane.cloud,
                camera: &pane.camera,
                pane_size: size,
            };
            let label = pane.picker.primary_click(&surface, pos, ctrl);
            let last = pane.picker.keypoints().iter().last().copied();
            if let (Some(label), Some(kp)) = (label, last) {
                ws.report_info(format!(
                    "cloud keypoint {label} at ({:.3}, {:.3}, {:.3})",
                    kp.world.x, kp.world.y, kp.world.z
                ));
            }
        }
        CloudMsg::Orbit { delta } => pane.camera.orbit(delta.x as f32, delta.y as f32),
        CloudMsg::Pan { delta, pane: size } => {
            pane.camera.pan(delta.x as f32, delta.y as f32, size)
        }
        CloudMsg::Dolly { steps } => pane.camera.dolly(style::cloud::DOLLY_STEP.powf(steps)),
    }
    cosmic::Task::none()
}

// ============================================================================
// Edits and UI
// ============================================================================

pub fn handle_edit_msg(ws: &mut Workspace, msg: EditMsg) -> HandlerResult {
    let side = match msg {
        EditMsg::DeleteLast(side) | EditMsg::DeleteAll(side) => side,
    };
    let outcome = match ws.picker_mut(side) {
        None => Err(CorrespondenceError::PrereqMissing(side)),
        Some(picker) => Ok(match msg {
            EditMsg::DeleteLast(_) => match picker.remove_last() {
                Some(_) => format!(
                    "removed last {} keypoint ({} left)",
                    side.label(),
                    picker.keypoints().len()
                ),
                None => format!("no {} keypoints to remove", side.label()),
            },
            EditMsg::DeleteAll(_) => {
                let count = picker.keypoints().len();
                picker.remove_all();
                format!("removed all {count} {} keypoints", side.label())
            }
        }),
    };
    match outcome {
        Ok(text) => ws.report_info(text),
        Err(err) => ws.report_error(err.to_string()),
    }
    cosmic::Task::none()
}

pub fn handle_ui_msg(ws: &mut Workspace, msg: UiMsg) -> HandlerResult {
    match msg {
        UiMsg::ToggleHelp => ws.help_open = !ws.help_open,
        UiMsg::SetRgbDisplay(rgb) => {
            ws.config.rgb_display = rgb;
            ws.config.save();
            if let Some(pane) = ws.image.as_mut() {
                pane.source.set_display(rgb);
            }
        }
        UiMsg::Quit => {
            log::info!("quit requested");
            std::process::exit(0);
        }
    }
    cosmic::Task::none()
}

// ============================================================================
// Dialog helpers
// ============================================================================

fn dialog_cancelled() -> HandlerResult {
    log::debug!("file dialog cancelled");
    cosmic::Task::none()
}

fn start_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

fn choose_open(
    title: &'static str,
    filter: (&'static str, &'static [&'static str]),
    msg: impl Fn(Option<PathBuf>) -> Msg + Send + 'static,
) -> HandlerResult {
    cosmic::Task::perform(
        async move {
            rfd::AsyncFileDialog::new()
                .set_title(title)
                .add_filter(filter.0, filter.1)
                .set_directory(start_dir())
                .pick_file()
                .await
                .map(|file| file.path().to_path_buf())
        },
        msg,
    )
}

fn choose_save(
    title: &'static str,
    file_name: &'static str,
    msg: impl Fn(Option<PathBuf>) -> Msg + Send + 'static,
) -> HandlerResult {
    cosmic::Task::perform(
        async move {
            rfd::AsyncFileDialog::new()
                .set_title(title)
                .add_filter("keypoint lists", &["txt"])
                .set_directory(start_dir())
                .set_file_name(file_name)
                .save_file()
                .await
                .map(|file| file.path().to_path_buf())
        },
        msg,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PairPickConfig;
    use glam::DVec3;

    fn workspace_with_panes(dir: &tempfile::TempDir) -> Workspace {
        let image_path = dir.path().join("scene.png");
        image::RgbImage::new(8, 6).save(&image_path).unwrap();
        let cloud_path = dir.path().join("scan.xyz");
        std::fs::write(&cloud_path, "0 0 0\n1 2 3\n4 5 6\n").unwrap();

        let mut ws = Workspace::new(PairPickConfig::default());
        ws.image = Some(ImagePane::open(&image_path, true).unwrap());
        ws.cloud = Some(CloudPane::open(&cloud_path, ws.cloud_gate()).unwrap());
        ws
    }

    fn set_points(ws: &mut Workspace, side: Side, coords: &[[f64; 3]]) {
        ws.picker_mut(side)
            .unwrap()
            .replace_all(coords.iter().map(|c| DVec3::from_array(*c)).collect());
    }

    #[test]
    fn save_writes_when_counts_match() {
        let dir = tempfile::tempdir().unwrap();
        let mut ws = workspace_with_panes(&dir);
        set_points(&mut ws, Side::Image, &[[1.0, 2.0, 0.0], [3.4, 5.6, 0.0]]);
        set_points(&mut ws, Side::Cloud, &[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);

        let out_2d = dir.path().join("fixed.txt");
        let out_3d = dir.path().join("moving.txt");
        save_points(&mut ws, Side::Image, &out_2d);
        save_points(&mut ws, Side::Cloud, &out_3d);

        assert_eq!(std::fs::read_to_string(&out_2d).unwrap(), "1 2\n3.4 5.6\n");
        assert_eq!(
            std::fs::read_to_string(&out_3d).unwrap(),
            "1 2 3\n4 5 6\n"
        );
    }

    #[test]
    fn save_is_rejected_on_count_mismatch_and_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut ws = workspace_with_panes(&dir);
        set_points(&mut ws, Side::Image, &[[1.0, 2.0, 0.0]]);

        for side in [Side::Image, Side::Cloud] {
            let out = dir.path().join(format!("{}.txt", side.label()));
            save_points(&mut ws, side, &out);
            assert!(!out.exists());
            assert!(matches!(
                ws.status.as_ref().map(|s| s.kind),
                Some(crate::session::state::StatusKind::Error)
            ));
        }
    }

    #[test]
    fn empty_lists_save_vacuously() {
        let dir = tempfile::tempdir().unwrap();
        let mut ws = workspace_with_panes(&dir);
        let out = dir.path().join("empty.txt");
        save_points(&mut ws, Side::Image, &out);
        assert_eq!(std::fs::read_to_string(&out).unwrap(), "");
    }

    #[test]
    fn load_replaces_the_list() {
        let dir = tempfile::tempdir().unwrap();
        let mut ws = workspace_with_panes(&dir);
        set_points(&mut ws, Side::Image, &[[9.0, 9.0, 0.0]]);

        let input = dir.path().join("in.txt");
        std::fs::write(&input, "1 2\n3 4\n").unwrap();
        load_points(&mut ws, Side::Image, &input);

        let stored: Vec<_> = ws.image.as_ref().unwrap().picker.keypoints().positions().collect();
        assert_eq!(
            stored,
            vec![DVec3::new(1.0, 2.0, 0.0), DVec3::new(3.0, 4.0, 0.0)]
        );
    }

    #[test]
    fn failed_load_leaves_the_list_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let mut ws = workspace_with_panes(&dir);
        set_points(&mut ws, Side::Cloud, &[[7.0, 8.0, 9.0]]);

        let input = dir.path().join("bad.txt");
        std::fs::write(&input, "1 2 3\nnot a point\n").unwrap();
        load_points(&mut ws, Side::Cloud, &input);

        let stored: Vec<_> = ws.cloud.as_ref().unwrap().picker.keypoints().positions().collect();
        assert_eq!(stored, vec![DVec3::new(7.0, 8.0, 9.0)]);
        assert!(matches!(
            ws.status.as_ref().map(|s| s.kind),
            Some(crate::session::state::StatusKind::Error)
        ));
    }

    #[test]
    fn delete_last_on_empty_list_is_a_surfaced_noop() {
        let dir = tempfile::tempdir().unwrap();
        let mut ws = workspace_with_panes(&dir);
        let _ = handle_edit_msg(&mut ws, EditMsg::DeleteLast(Side::Image));
        assert!(matches!(
            ws.status.as_ref().map(|s| s.kind),
            Some(crate::session::state::StatusKind::Info)
        ));
    }

    #[test]
    fn edits_without_a_pane_report_prereq_missing() {
        let mut ws = Workspace::new(PairPickConfig::default());
        let _ = handle_edit_msg(&mut ws, EditMsg::DeleteAll(Side::Cloud));
        assert!(matches!(
            ws.status.as_ref().map(|s| s.kind),
            Some(crate::session::state::StatusKind::Error)
        ));
    }

    #[test]
    fn opening_an_image_resets_only_that_side() {
        let dir = tempfile::tempdir().unwrap();
        let mut ws = workspace_with_panes(&dir);
        set_points(&mut ws, Side::Image, &[[1.0, 1.0, 0.0]]);
        set_points(&mut ws, Side::Cloud, &[[2.0, 2.0, 2.0]]);

        let other = dir.path().join("other.png");
        image::RgbImage::new(2, 2).save(&other).unwrap();
        let _ = handle_file_msg(&mut ws, FileMsg::OpenImageChosen(Some(other)));

        assert_eq!(ws.counts(), (0, 1));
    }
}
