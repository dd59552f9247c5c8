//! HTML shell of the interactive map.
//!
//! `{{TITLE}}` is replaced with the escaped page title and `{{MAP_SPEC}}`
//! with the serialized [`crate::map::MapDocument`]. The script builds every
//! layer from that JSON object; nothing else is templated.

pub const MAP_TEMPLATE_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{{TITLE}}</title>
  <link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/leaflet/1.9.4/leaflet.css" crossorigin="anonymous"
    referrerpolicy="no-referrer" />
  <script src="https://cdnjs.cloudflare.com/ajax/libs/leaflet/1.9.4/leaflet.js" crossorigin="anonymous"
    referrerpolicy="no-referrer"></script>
  <style>
    html, body { height: 100%; margin: 0; }
    #map { position: absolute; top: 0; bottom: 0; left: 0; right: 0; }
    .leaflet-tooltip b { margin-right: 4px; }
  </style>
</head>
<body>
  <div id="map"></div>
  <script>
    const spec = {{MAP_SPEC}};

    const map = L.map('map', { worldCopyJump: false })
      .setView(spec.view.center, spec.view.zoom);

    L.tileLayer(spec.view.base.url, {
      attribution: spec.view.base.attribution,
      maxZoom: 19
    }).addTo(map);

    const field = (props, name) => {
      const v = props ? props[name] : undefined;
      return v === null || v === undefined ? '' : v;
    };

    const tooltipHtml = (props, t) => t.fields
      .map((f, i) => (t.aliases[i] ? '<b>' + t.aliases[i] + '</b>' : '') + field(props, f))
      .join('<br>');

    const popupHtml = (props, p) => '<div style="' + p.style + '">' + p.fields
      .map(f => (p.labels ? '<b>' + f + '</b> ' : '') + field(props, f))
      .join('<br>') + '</div>';

    const buildLayer = (o) => {
      switch (o.kind) {
        case 'geojson':
          return L.geoJSON(o.data, {
            style: f => f.style,
            onEachFeature: (f, layer) => {
              if (o.tooltip) {
                layer.bindTooltip(tooltipHtml(f.properties, o.tooltip), { sticky: o.tooltip.sticky });
              }
              if (o.popup) {
                layer.bindPopup(popupHtml(f.properties, o.popup), { maxWidth: o.popup.max_width });
              }
            }
          });
        case 'tiles':
          return L.tileLayer(o.url, { attribution: o.attribution });
        case 'wms':
          return L.tileLayer.wms(o.url, {
            layers: o.layers,
            format: o.format,
            transparent: o.transparent,
            time: o.time,
            attribution: o.attribution
          });
        case 'marker':
          return L.marker([o.lat, o.lon]).bindPopup(o.popup).bindTooltip(o.tooltip);
        default:
          return null;
      }
    };

    const overlays = {};
    for (const o of spec.overlays) {
      const layer = buildLayer(o);
      if (!layer) continue;
      if (o.show) layer.addTo(map);
      overlays[o.name] = layer;
    }

    L.control.layers(null, overlays).addTo(map);
  </script>
</body>
</html>
"#;
