//! Standalone HTML page for a rendered viewer.

use crate::text::escape_html;
use crate::viewer::Viewer;

const STYLESHEET: &str = r#"
.pathwayViewer, .pathwayViewer * { box-sizing: border-box; }
.pathwayViewer.langString .langCode { display: none; }
.pathwayViewer.pathwayHeader, .pathwayViewer.pathwayMessages { font-family: Calibri, Tahoma, Arial, Helvetica, sans-serif; }
.pathwayViewer.pathwayContent { display: flex; position: relative; font-family: Calibri, Tahoma, Arial, Helvetica, sans-serif; background-color: #EEE; overflow: auto; }
.pathwayViewer.progressionModelTable { width: 100%; border-collapse: collapse; }
.pathwayViewer.progressionModelTableHeaderCell { font-weight: bold; background-color: #333; color: #FFF; padding: 5px 10px; min-width: 550px; border-right: 1px solid #FFF; }
.pathwayViewer.progressionModelTableBodyCell { vertical-align: top; border-right: 1px dashed #333; }
.pathwayViewer.progressionModelTableBodyCellInner { display: flex; justify-content: flex-end; position: relative; z-index: 10; }
.pathwayViewer.connectorLayers { position: absolute; top: 0; left: 0; pointer-events: none; z-index: 20; }
.pathwayViewer.orderableNodeList { display: flex; flex-direction: column; }
.pathwayViewer.pathwayDisplay { width: 500px; margin: 50px 100px; background-color: #FFF; border: 1px solid #CCC; border-radius: 5px; overflow: hidden; }
.pathwayViewer.pathwayDisplaySection { border-top: 1px solid #CCC; padding: 5px 10px; }
.pathwayViewer.pathwayDisplaySection:first-child { border: none; }
.pathwayViewer.pathwayDisplaySection:empty { display: none; }
.pathwayViewer.pathwayDisplayLinks a { display: block; text-decoration: none; }
.pathwayViewer.componentWrapper, .pathwayViewer.conditionWrapper { display: flex; align-items: center; justify-content: flex-end; order: 1; }
.pathwayViewer.componentWrapper[data-ishighlighted='true'], .pathwayViewer.conditionWrapper[data-ishighlighted='true'] { order: 0; }
.pathwayViewer.componentWrapper[data-ishighlighted='true'] .componentDisplay { box-shadow: 0 0 10px #0FA; }
.pathwayViewer.conditionWrapper[data-ishighlighted='true'] .conditionDisplay { box-shadow: 0 0 10px #FA0; }
.pathwayViewer.pathwayDisplayHeader { display: flex; gap: 10px; align-items: center; font-weight: bold; }
.pathwayViewer.pathwayDisplayHeader .label { margin-right: auto; }
.pathwayViewer.componentDisplayFooter { text-align: right; font-size: 80%; }
.pathwayViewer.conditionDisplay { background-color: #FFFFEE; border-color: #EEDDCC; }
.pathwayViewer.conditionRequirementsBox { padding: 10px; font-weight: bold; white-space: nowrap; cursor: help; background-color: #FFFFCC; }
"#;

/// A full HTML document: stylesheet plus the viewer's container.
pub fn standalone_page(viewer: &Viewer) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n<style>{STYLESHEET}</style>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        escape_html(&viewer.title()),
        viewer.to_html()
    )
}
